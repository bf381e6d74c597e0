//! HTTP transport for the DNSDumpster client
//!
//! Provides a mockable, configurable HTTP client wrapper.
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpClientTrait`
//! - **Configurable**: Timeouts, attempt budget, proxy, user-agent
//! - **Middleware support**: Fixed-delay retry of transient failures
//! - **Testing support**: Easy mocking with wiremock

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod response;

pub use client::{shared_client, HttpClient, HttpClientTrait};
pub use config::HttpConfig;
pub use error::{HttpError, Result};
pub use middleware::{RetryConfig, RetryMiddleware};
pub use response::HttpResponse;

/// Re-export commonly used types
pub use reqwest::{header, StatusCode};
