//! HTTP transport error types

use std::time::Duration;

use thiserror::Error;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP transport errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Could not reach the remote host
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Header name or value rejected by the HTTP stack
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// Response body could not be decoded
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// Every attempt failed with a retryable error
    #[error("Retry limit exceeded after {attempts} attempts: {source}")]
    RetryLimitExceeded {
        attempts: u32,
        #[source]
        source: Box<HttpError>,
    },

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),
}

impl HttpError {
    /// Check if error is retryable
    ///
    /// Only connection-level and request-level failures qualify. Malformed
    /// input (bad URL, bad header) fails the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::RequestFailed(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            HttpError::Connection(_) | HttpError::Timeout(_) => true,
            _ => false,
        }
    }

    /// The error that ended the last attempt, looking through retry exhaustion
    pub fn last_attempt_error(&self) -> &HttpError {
        match self {
            HttpError::RetryLimitExceeded { source, .. } => source.last_attempt_error(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_are_retryable() {
        assert!(HttpError::Connection("refused".to_string()).is_retryable());
        assert!(HttpError::Timeout(Duration::from_secs(30)).is_retryable());
    }

    #[test]
    fn test_malformed_requests_are_not_retryable() {
        assert!(!HttpError::InvalidUrl("nope".to_string()).is_retryable());
        assert!(!HttpError::InvalidHeader("x-api-key".to_string()).is_retryable());
        assert!(!HttpError::Decode("eof".to_string()).is_retryable());
    }

    #[test]
    fn test_retry_limit_message_keeps_last_error() {
        let err = HttpError::RetryLimitExceeded {
            attempts: 3,
            source: Box::new(HttpError::Connection("refused".to_string())),
        };

        assert_eq!(
            err.to_string(),
            "Retry limit exceeded after 3 attempts: Connection failed: refused"
        );
        assert!(matches!(err.last_attempt_error(), HttpError::Connection(_)));
        assert!(!err.is_retryable());
    }
}
