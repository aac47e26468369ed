//! Tests for the HTTP transport module

use super::*;
use crate::types::{BackoffType, Method};
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_transport_config_default() {
    let config = HttpTransportConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 0);
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("ffs-client/"));
}

#[test]
fn test_transport_config_builder() {
    let config = HttpTransportConfig::builder()
        .timeout(Duration::from_secs(5))
        .max_retries(2)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .rate_limit(RateLimiterConfig::new(2, 2))
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 2)));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_builder_and_header_lookup() {
    let request = TransportRequest::new(Method::POST, "https://example.com/search")
        .header("Content-Type", "application/json")
        .body("{}");

    assert_eq!(request.header_value("content-type"), Some("application/json"));
    assert_eq!(request.header_value("Authorization"), None);
    assert_eq!(request.body.as_deref(), Some(b"{}".as_slice()));
}

#[test]
fn test_response_status_text_and_success() {
    let ok = TransportResponse::new(200, "ok");
    assert!(ok.is_success());
    assert_eq!(ok.status_text, "200 OK");
    assert_eq!(ok.text(), "ok");

    let missing = TransportResponse::new(404, "");
    assert!(!missing.is_success());
    assert_eq!(missing.status_text, "404 Not Found");
}

#[tokio::test]
async fn test_post_sends_headers_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/file-events"))
        .and(header("Content-Type", "application/json"))
        .and(header("Authorization", "v3_user_token abc"))
        .and(body_string(r#"{"groups":[]}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"fileEvents":[]}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = TransportRequest::new(
        Method::POST,
        format!("{}/v1/file-events", mock_server.uri()),
    )
    .header("Content-Type", "application/json")
    .header("Authorization", "v3_user_token abc")
    .body(r#"{"groups":[]}"#);

    let response = transport.send(request).await.unwrap();
    assert!(response.is_success());
    assert_eq!(response.text(), r#"{"fileEvents":[]}"#);
}

#[tokio::test]
async fn test_non_success_status_is_returned_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .send(TransportRequest::new(
            Method::GET,
            format!("{}/missing", mock_server.uri()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.status_text, "404 Not Found");
    assert_eq!(response.text(), "nope");
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .send(TransportRequest::new(
            Method::GET,
            format!("{}/flaky", mock_server.uri()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status, 503);
}

#[tokio::test]
async fn test_opt_in_retry_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .mount(&mock_server)
        .await;

    let config = HttpTransportConfig::builder()
        .max_retries(3)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(10),
        )
        .build();
    let transport = HttpTransport::with_config(config).unwrap();

    let response = transport
        .send(TransportRequest::new(
            Method::GET,
            format!("{}/flaky", mock_server.uri()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.text(), "recovered");
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpTransportConfig::builder()
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(5),
        )
        .build();
    let transport = HttpTransport::with_config(config).unwrap();

    let response = transport
        .send(TransportRequest::new(
            Method::GET,
            format!("{}/down", mock_server.uri()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status, 502);
}

fn transport_with_backoff(backoff_type: BackoffType, max: Duration) -> HttpTransport {
    let config = HttpTransportConfig::builder()
        .backoff(backoff_type, Duration::from_millis(100), max)
        .build();
    HttpTransport::with_config(config).unwrap()
}

#[test]
fn test_calculate_backoff_constant() {
    let transport = transport_with_backoff(BackoffType::Constant, Duration::from_secs(10));
    assert_eq!(transport.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(transport.calculate_backoff(5), Duration::from_millis(100));
}

#[test]
fn test_calculate_backoff_linear() {
    let transport = transport_with_backoff(BackoffType::Linear, Duration::from_secs(10));
    assert_eq!(transport.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(transport.calculate_backoff(2), Duration::from_millis(300));
}

#[test]
fn test_calculate_backoff_exponential_respects_max() {
    let transport = transport_with_backoff(BackoffType::Exponential, Duration::from_millis(500));
    assert_eq!(transport.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(transport.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(transport.calculate_backoff(10), Duration::from_millis(500));
}

#[test]
fn test_transport_debug() {
    let transport = HttpTransport::with_config(
        HttpTransportConfig::builder()
            .rate_limit(RateLimiterConfig::default())
            .build(),
    )
    .unwrap();
    assert!(transport.has_rate_limiter());
    let debug = format!("{transport:?}");
    assert!(debug.contains("HttpTransport"));
    assert!(debug.contains("has_rate_limiter: true"));
}
