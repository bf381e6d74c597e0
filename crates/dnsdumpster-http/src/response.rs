//! Buffered HTTP response

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{HttpError, Result};

/// Response with the body already read into memory.
///
/// Non-2xx statuses are returned as responses rather than errors so callers
/// can inspect the provider's error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: StatusCode,
    body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: String) -> Self {
        Self { status, body }
    }

    /// Read status and body from a reqwest response.
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let body = response.text().await?;
        Ok(Self { status, body })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Server errors are worth another attempt; 429 is left to the caller.
    pub fn is_retryable_status(&self) -> bool {
        self.status.is_server_error()
    }

    /// Raw body text
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// Decode the body as JSON, returning `None` when it is not valid JSON
    pub fn json_opt<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_str(&self.body).ok()
    }
}
