//! DNSDumpster API client

use std::{path::Path, sync::Arc, time::Duration};

use dnsdumpster_http::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    shared_client, HttpClientTrait, HttpConfig, HttpError, HttpResponse, RetryConfig,
    RetryMiddleware, StatusCode,
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::{
    clock::{Clock, SystemClock},
    config::ClientConfig,
    error::{DnsDumpsterError, Result},
    rate_limit::{RateLimiter, RATE_LIMIT_INTERVAL},
    settings::RawClientConfig,
    validation::FetchRequest,
};

/// Decoded JSON body returned by the API
pub type FetchResult = Map<String, Value>;

const API_KEY_HEADER: &str = "x-api-key";

/// Client for the DNSDumpster domain lookup API.
///
/// Requests made through one client are spaced by the rate-limit interval,
/// including requests that failed.
pub struct DnsDumpsterClient {
    config: ClientConfig,
    transport: Arc<dyn HttpClientTrait>,
    retry: RetryMiddleware,
    rate_limiter: RateLimiter,
}

impl DnsDumpsterClient {
    /// Create a client with the production transport and clock
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Create a client from the environment, optionally seeded by a TOML file
    pub fn from_env(config_file: Option<&Path>) -> Result<Self> {
        let config = RawClientConfig::load(config_file)?.into_config()?;
        Self::new(config)
    }

    pub fn builder(config: ClientConfig) -> DnsDumpsterClientBuilder {
        DnsDumpsterClientBuilder::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Fetch the first page of results for `domain`
    pub async fn fetch_domain(&self, domain: &str) -> Result<FetchResult> {
        self.fetch_data(domain, 1).await
    }

    /// Fetch one page of results for `domain`.
    ///
    /// Validation failures are returned as-is and never reach the network.
    /// Everything after that is wrapped with the domain and page.
    pub async fn fetch_data(&self, domain: &str, page: u32) -> Result<FetchResult> {
        self.config.validate()?;
        let request = FetchRequest::new(domain, page)?;

        let permit = self.rate_limiter.acquire().await;
        let outcome = self.execute(&request).await;
        drop(permit);

        outcome.map_err(|e| {
            warn!("Lookup of {} (page {}) failed: {}", domain, page, e);
            DnsDumpsterError::fetch(request.domain(), request.page(), e)
        })
    }

    async fn execute(&self, request: &FetchRequest) -> Result<FetchResult> {
        let url = request.url(self.config.base_host());
        let headers = self.headers()?;

        debug!("Fetching {} (page {})", request.domain(), request.page());
        let response = self
            .retry
            .execute_request(|| self.transport.get(&url, &headers))
            .await?;

        let result = classify_response(response)?;
        info!(
            "Fetched {} (page {}): {} top-level fields",
            request.domain(),
            request.page(),
            result.len()
        );
        Ok(result)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut key = HeaderValue::from_str(self.config.api_key())
            .map_err(|_| HttpError::InvalidHeader(API_KEY_HEADER.to_string()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

/// Turn a final response into a result or a typed error
fn classify_response(response: HttpResponse) -> Result<FetchResult> {
    let status = response.status();

    if response.is_success() {
        return response.json::<FetchResult>().map_err(|e| DnsDumpsterError::ApiRequest {
            status: status.as_u16(),
            message: e.to_string(),
        });
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(DnsDumpsterError::RateLimitExceeded);
    }

    let message = response
        .json_opt::<Value>()
        .and_then(|body| match body.get("error") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
        .unwrap_or_else(|| response.text().to_string());

    Err(DnsDumpsterError::ApiRequest {
        status: status.as_u16(),
        message,
    })
}

/// Builder for [`DnsDumpsterClient`] with injectable collaborators
pub struct DnsDumpsterClientBuilder {
    config: ClientConfig,
    http: HttpConfig,
    transport: Option<Arc<dyn HttpClientTrait>>,
    clock: Option<Arc<dyn Clock>>,
    retry: Option<RetryConfig>,
    rate_limit_interval: Duration,
}

impl DnsDumpsterClientBuilder {
    fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: HttpConfig::default(),
            transport: None,
            clock: None,
            retry: None,
            rate_limit_interval: RATE_LIMIT_INTERVAL,
        }
    }

    /// Settings for the default transport; also the source of the retry
    /// policy unless one is set explicitly
    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn HttpClientTrait>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn rate_limit_interval(mut self, interval: Duration) -> Self {
        self.rate_limit_interval = interval;
        self
    }

    pub fn build(self) -> Result<DnsDumpsterClient> {
        self.config.validate()?;

        let retry = self.retry.unwrap_or_else(|| self.http.retry_config());
        let transport = match self.transport {
            Some(transport) => transport,
            None => shared_client(self.http)?,
        };
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);

        Ok(DnsDumpsterClient {
            config: self.config,
            transport,
            retry: RetryMiddleware::new(retry),
            rate_limiter: RateLimiter::new(self.rate_limit_interval, clock),
        })
    }
}
