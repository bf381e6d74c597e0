//! DNSDumpster API client
//!
//! Looks up DNS reconnaissance data for a domain, one page per call, while
//! keeping to the provider's request rate.
//!
//! ```no_run
//! use dnsdumpster::{ClientConfig, DnsDumpsterClient};
//!
//! # async fn run() -> dnsdumpster::Result<()> {
//! let config = ClientConfig::new("my-api-key", "https://api.dnsdumpster.com")?;
//! let client = DnsDumpsterClient::new(config)?;
//! let records = client.fetch_domain("example.com").await?;
//! println!("{}", serde_json::Value::Object(records));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod rate_limit;
pub mod settings;
pub mod validation;

pub use client::{DnsDumpsterClient, DnsDumpsterClientBuilder, FetchResult};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ClientConfig;
pub use error::{DnsDumpsterError, Result};
pub use rate_limit::{RateLimitPermit, RateLimiter, RATE_LIMIT_INTERVAL};
pub use settings::{RawClientConfig, API_KEY_VAR, API_URL_VAR, DEFAULT_API_URL};
pub use validation::{validate_domain, validate_page, FetchRequest};
