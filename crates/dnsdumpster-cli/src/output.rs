// Output formatting for lookup results

use std::io::Write;

use dnsdumpster::FetchResult;

/// Write one lookup result as pretty-printed JSON followed by a newline
pub fn write_result<W: Write>(out: &mut W, result: &FetchResult) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)?;
    Ok(())
}

/// Render an error with its full source chain, one cause per line
pub fn format_error(err: &anyhow::Error) -> String {
    let mut message = format!("Error: {}", err);
    for cause in err.chain().skip(1) {
        message.push_str(&format!("\n  caused by: {}", cause));
    }
    message
}
