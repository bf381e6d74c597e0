// Logging setup for the CLI

use tracing::Level;

/// Level used for the given verbosity flag
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Initialize the global subscriber. Logs go to stderr so stdout stays JSON.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
