//! DNSDumpster command-line interface
//!
//! Thin wrapper over [`dnsdumpster::DnsDumpsterClient`]: parses arguments,
//! resolves the config source, and prints each lookup as pretty JSON.

pub mod logging;
pub mod output;
pub mod router;

pub use router::{run, Cli};
