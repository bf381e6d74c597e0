//! HTTP middleware for retry logic

use std::{future::Future, time::Duration};

use tracing::{debug, warn};

use crate::{error::HttpError, response::HttpResponse, Result};

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts in total, including the first one
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(100),
        }
    }
}

impl RetryConfig {
    /// Policy that makes exactly one attempt
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Retry middleware for HTTP operations
#[derive(Debug, Clone)]
pub struct RetryMiddleware {
    config: RetryConfig,
}

impl RetryMiddleware {
    /// Create new retry middleware
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Get the retry policy
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute operation with retry logic, retrying retryable errors only
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.execute_with(operation, |_| false).await
    }

    /// Execute a request, also retrying responses whose status the transport
    /// treats as transient. The last response is returned as-is once the
    /// budget runs out.
    pub async fn execute_request<F, Fut>(&self, operation: F) -> Result<HttpResponse>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<HttpResponse>>,
    {
        self.execute_with(operation, HttpResponse::is_retryable_status)
            .await
    }

    async fn execute_with<F, Fut, T, P>(&self, mut operation: F, retry_ok: P) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        P: Fn(&T) -> bool,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempt < max_attempts && retry_ok(&result) {
                        warn!(
                            "Transient response (attempt {}/{}), retrying in {:?}",
                            attempt, max_attempts, self.config.delay
                        );
                    } else {
                        if attempt > 1 {
                            debug!("Request completed after {} attempts", attempt);
                        }
                        return Ok(result);
                    }
                }
                Err(e) => {
                    if !e.is_retryable() {
                        debug!("Non-retryable error: {e}");
                        return Err(e);
                    }

                    if attempt >= max_attempts {
                        return Err(HttpError::RetryLimitExceeded {
                            attempts: attempt,
                            source: Box::new(e),
                        });
                    }

                    warn!(
                        "Request failed (attempt {}/{}), retrying in {:?}: {}",
                        attempt, max_attempts, self.config.delay, e
                    );
                }
            }

            if !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    use reqwest::StatusCode;

    use super::*;

    fn fast_policy(max_attempts: u32) -> RetryMiddleware {
        RetryMiddleware::new(RetryConfig {
            max_attempts,
            delay: Duration::from_millis(1),
        })
    }

    #[test]
    fn test_default_policy() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.delay, Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_retry_success_on_first_attempt() {
        let middleware = RetryMiddleware::new(RetryConfig::default());

        let result = middleware
            .execute(|| async { Ok::<_, HttpError>(42) })
            .await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_retry_success_on_third_attempt() {
        let middleware = fast_policy(3);
        let calls = Arc::new(AtomicU32::new(0));

        let result = middleware
            .execute(|| {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    if n < 3 {
                        Err(HttpError::Connection("refused".to_string()))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_limit_exceeded() {
        let middleware = fast_policy(3);
        let calls = Arc::new(AtomicU32::new(0));

        let result = middleware
            .execute(|| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>(HttpError::Timeout(Duration::from_secs(30)))
                }
            })
            .await;

        assert!(matches!(
            result,
            Err(HttpError::RetryLimitExceeded { attempts: 3, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error() {
        let middleware = fast_policy(3);
        let calls = Arc::new(AtomicU32::new(0));

        let result = middleware
            .execute(|| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>(HttpError::InvalidUrl("bad".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_response_retried_then_returned() {
        let middleware = fast_policy(3);
        let calls = Arc::new(AtomicU32::new(0));

        let result = middleware
            .execute_request(|| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(HttpResponse::new(
                        StatusCode::BAD_GATEWAY,
                        "upstream down".to_string(),
                    ))
                }
            })
            .await
            .unwrap();

        assert_eq!(result.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_error_response_not_retried() {
        let middleware = fast_policy(3);
        let calls = Arc::new(AtomicU32::new(0));

        let result = middleware
            .execute_request(|| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(HttpResponse::new(
                        StatusCode::TOO_MANY_REQUESTS,
                        r#"{"error":"Rate limit exceeded"}"#.to_string(),
                    ))
                }
            })
            .await
            .unwrap();

        assert_eq!(result.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
