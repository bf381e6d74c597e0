//! Transport tests against a local mock server

use std::time::Duration;

use dnsdumpster_http::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    HttpClient, HttpClientTrait, HttpConfig, HttpError, RetryConfig, RetryMiddleware, StatusCode,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert("x-api-key", HeaderValue::from_static("test-api-key"));
    headers
}

#[tokio::test]
async fn test_get_sends_headers_and_reads_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/example.com"))
        .and(query_param("page", "2"))
        .and(header("x-api-key", "test-api-key"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"domain": "example.com"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::with_defaults().unwrap();
    let url = format!("{}/domain/example.com?page=2", server.uri());
    let response = client.get(&url, &json_headers()).await.unwrap();

    assert!(response.is_success());
    let body: Value = response.json().unwrap();
    assert_eq!(body["domain"], "example.com");
}

#[tokio::test]
async fn test_error_status_is_a_response_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"error": "Rate limit exceeded"})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::with_defaults().unwrap();
    let response = client.get(&server.uri(), &json_headers()).await.unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.text().contains("Rate limit exceeded"));
}

#[tokio::test]
async fn test_timeout_is_reported_as_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = HttpConfig::default().with_timeout(Duration::from_millis(200));
    let client = HttpClient::new(config).unwrap();
    let err = client.get(&server.uri(), &json_headers()).await.unwrap_err();

    assert!(matches!(err, HttpError::Timeout(_)), "unexpected error: {err}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_server_errors_use_whole_attempt_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(3)
        .mount(&server)
        .await;

    let client = HttpClient::with_defaults().unwrap();
    let retry = RetryMiddleware::new(RetryConfig {
        max_attempts: 3,
        delay: Duration::from_millis(5),
    });
    let url = server.uri();
    let headers = json_headers();

    let response = retry
        .execute_request(|| client.get(&url, &headers))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.text(), "maintenance");
}
