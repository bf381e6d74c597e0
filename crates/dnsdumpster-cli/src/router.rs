// Argument parsing and lookup dispatch

use std::{io::Write, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use dnsdumpster::{DnsDumpsterClient, RawClientConfig};
use tracing::{debug, info};

use crate::output;

/// Query the DNSDumpster API for one or more domains
#[derive(Parser, Debug)]
#[command(name = "dnsdumpster")]
#[command(about = "Look up DNS reconnaissance data from DNSDumpster", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Domains to look up, in order
    #[arg(required = true, value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Result page to request for every domain
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// TOML file providing DNSDumpster_API_KEY / DNSDumpster_API_URL
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// API key, overriding the config file and environment
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// API base URL, overriding the config file and environment
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the config source: file, then environment, then flags
    pub fn client(&self) -> anyhow::Result<DnsDumpsterClient> {
        let mut raw = RawClientConfig::load(self.config.as_deref())
            .context("Failed to load DNSDumpster configuration")?;
        if let Some(key) = &self.api_key {
            raw.api_key = Some(key.clone());
        }
        if let Some(url) = &self.api_url {
            raw.api_url = Some(url.clone());
        }

        let config = raw
            .into_config()
            .context("Invalid DNSDumpster configuration")?;
        debug!("Using API at {}", config.base_host());

        DnsDumpsterClient::new(config).context("Failed to create DNSDumpster client")
    }
}

/// Look up every domain in order, writing each result to `out`.
///
/// Stops at the first failure.
pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let client = cli.client()?;

    for domain in &cli.domains {
        info!("Looking up {} (page {})", domain, cli.page);
        let result = client
            .fetch_data(domain, cli.page)
            .await
            .with_context(|| format!("Lookup failed for {}", domain))?;
        output::write_result(out, &result)?;
    }

    Ok(())
}
