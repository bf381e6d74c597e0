//! Error types for the DNSDumpster client

use dnsdumpster_http::HttpError;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, DnsDumpsterError>;

/// Errors that can occur when talking to the DNSDumpster API
#[derive(Debug, Error)]
pub enum DnsDumpsterError {
    /// Missing or empty API key / base URL
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller supplied a domain that is not a valid hostname
    #[error("Invalid domain provided: '{0}'")]
    InvalidDomain(String),

    /// Caller supplied an out-of-range argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The provider answered with HTTP 429
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The provider answered with a non-2xx status or an unusable body
    #[error("API request failed with status {status}: {message}")]
    ApiRequest { status: u16, message: String },

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// Call context attached to every failure of a request
    #[error("Failed to fetch domain info for {domain} (page {page}): {source}")]
    Fetch {
        domain: String,
        page: u32,
        #[source]
        source: Box<DnsDumpsterError>,
    },
}

impl DnsDumpsterError {
    pub(crate) fn fetch(domain: &str, page: u32, source: DnsDumpsterError) -> Self {
        DnsDumpsterError::Fetch {
            domain: domain.to_string(),
            page,
            source: Box::new(source),
        }
    }

    /// The underlying error with call context removed
    pub fn root_cause(&self) -> &DnsDumpsterError {
        match self {
            DnsDumpsterError::Fetch { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Whether the provider throttled the request
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.root_cause(), DnsDumpsterError::RateLimitExceeded)
    }

    /// Whether the error was raised before any network traffic
    pub fn is_validation(&self) -> bool {
        matches!(
            self.root_cause(),
            DnsDumpsterError::Configuration(_)
                | DnsDumpsterError::InvalidDomain(_)
                | DnsDumpsterError::InvalidArgument(_)
        )
    }

    /// HTTP status returned by the provider, if any
    pub fn status(&self) -> Option<u16> {
        match self.root_cause() {
            DnsDumpsterError::ApiRequest { status, .. } => Some(*status),
            DnsDumpsterError::RateLimitExceeded => Some(429),
            _ => None,
        }
    }
}
