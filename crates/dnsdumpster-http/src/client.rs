//! HTTP client implementation

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
    middleware::RetryConfig,
    response::HttpResponse,
};

/// Mockable HTTP transport.
///
/// Each call is a single attempt; retry policy lives in
/// [`RetryMiddleware`](crate::RetryMiddleware) so callers can count attempts.
#[async_trait]
pub trait HttpClientTrait: Send + Sync {
    /// Execute a GET request with the given headers
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse>;
}

/// Production HTTP client
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client with configuration
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        Ok(Self { inner, config })
    }

    /// Create HTTP client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpConfig::default())
    }

    /// Get configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Retry policy matching this client's configuration
    pub fn retry_config(&self) -> RetryConfig {
        self.config.retry_config()
    }

    fn classify(&self, err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(self.config.timeout)
        } else if err.is_connect() {
            HttpError::Connection(err.to_string())
        } else {
            HttpError::RequestFailed(err)
        }
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse> {
        let url = url
            .parse::<url::Url>()
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        debug!("HTTP GET: {}", url);
        let response = self
            .inner
            .get(url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = HttpResponse::from_reqwest(response).await?;
        debug!("HTTP GET completed with status {}", response.status());
        Ok(response)
    }
}

/// Create a shared HTTP client (Arc-wrapped for cloning)
pub fn shared_client(config: HttpConfig) -> Result<Arc<dyn HttpClientTrait>> {
    Ok(Arc::new(HttpClient::new(config)?))
}
