// DNSDumpster CLI entry point

use clap::Parser;
use dnsdumpster_cli::{
    logging, output,
    router::{run, Cli},
};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&cli, &mut out).await {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
