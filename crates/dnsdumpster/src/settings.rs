//! Config source loading
//!
//! Values come from an optional TOML file, then from environment variables
//! of the same name. Only the base URL has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::ClientConfig,
    error::{DnsDumpsterError, Result},
};

/// Environment variable / file key holding the API key
pub const API_KEY_VAR: &str = "DNSDumpster_API_KEY";
/// Environment variable / file key holding the API base URL
pub const API_URL_VAR: &str = "DNSDumpster_API_URL";
/// Used when no source sets the base URL
pub const DEFAULT_API_URL: &str = "https://api.dnsdumpster.com";

/// Config source contents before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClientConfig {
    #[serde(rename = "DNSDumpster_API_KEY", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(rename = "DNSDumpster_API_URL", default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl RawClientConfig {
    /// Read a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DnsDumpsterError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&contents).map_err(|e| {
            DnsDumpsterError::Configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_VAR) {
            debug!("{} set in environment", API_KEY_VAR);
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(API_URL_VAR) {
            debug!("{} overridden: {}", API_URL_VAR, url);
            self.api_url = Some(url);
        }
        self
    }

    /// Load from an optional file plus the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let raw = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(raw.with_env_overrides())
    }

    /// Validate into a [`ClientConfig`]
    pub fn into_config(self) -> Result<ClientConfig> {
        let api_key = self.api_key.unwrap_or_default();
        let api_url = self.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        ClientConfig::new(api_key, api_url)
    }
}
