//! Client configuration

use std::fmt;

use crate::error::{DnsDumpsterError, Result};

const MISSING_CONFIG: &str = "Missing required API configuration. \
     Both DNSDumpster_API_KEY and DNSDumpster_API_URL must be provided.";

/// Validated API credentials and endpoint.
///
/// The key is trimmed and the host loses any trailing `/`; both are
/// guaranteed non-empty once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_host: String,
}

impl ClientConfig {
    /// Build a config, rejecting empty values
    pub fn new(api_key: impl AsRef<str>, base_url: impl AsRef<str>) -> Result<Self> {
        let config = Self {
            api_key: api_key.as_ref().trim().to_string(),
            base_host: base_url.as_ref().trim_end_matches('/').to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    /// Check that both values are present
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() || self.base_host.is_empty() {
            return Err(DnsDumpsterError::Configuration(MISSING_CONFIG.to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_host", &self.base_host)
            .finish()
    }
}
