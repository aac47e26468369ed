//! Tests for the auth module

use super::*;
use crate::error::Error;
use crate::http::HttpTransport;
use crate::types::Method;
use base64::Engine;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn authenticator() -> BasicAuthenticator<HttpTransport> {
    BasicAuthenticator::new(HttpTransport::new().unwrap())
}

fn basic(username: &str, password: &str) -> String {
    let encoded =
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

#[tokio::test]
async fn test_bearer_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/oauth"))
        .and(header("Authorization", basic("analyst", "hunter2").as_str()))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "token_type": "bearer",
            "expires_in": 900
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let credential = authenticator()
        .authenticate(
            &format!("{}/v1/oauth", mock_server.uri()),
            "analyst",
            "hunter2",
        )
        .await
        .unwrap();

    assert_eq!(credential.token, "tok-123");
    assert!(credential.expires_at.is_some());
    assert!(!credential.is_expired());
}

#[tokio::test]
async fn test_legacy_get_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/c42api/v3/auth/jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"v3_user_token": "legacy-token"},
            "error": null,
            "warnings": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = authenticator().with_method(Method::GET);
    assert_eq!(auth.method(), Method::GET);

    let credential = auth
        .authenticate(
            &format!("{}/c42api/v3/auth/jwt", mock_server.uri()),
            "analyst",
            "hunter2",
        )
        .await
        .unwrap();

    assert_eq!(credential.token, "legacy-token");
    let lifetime = credential.expires_at.unwrap() - chrono::Utc::now();
    assert!(lifetime <= chrono::Duration::seconds(LEGACY_TOKEN_LIFETIME_SECS));
    assert!(lifetime > chrono::Duration::seconds(LEGACY_TOKEN_LIFETIME_SECS - 60));
}

#[tokio::test]
async fn test_non_success_status_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("denied"))
        .mount(&mock_server)
        .await;

    let err = authenticator()
        .authenticate(&mock_server.uri(), "analyst", "wrong")
        .await
        .unwrap_err();

    match err {
        Error::Auth { message } => assert!(message.contains("401 Unauthorized")),
        other => panic!("Expected Auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_maintenance_marker() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><h1>Service Under Maintenance</h1></html>"),
        )
        .mount(&mock_server)
        .await;

    let err = authenticator()
        .authenticate(&mock_server.uri(), "analyst", "hunter2")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ServiceMaintenance));
}

#[tokio::test]
async fn test_error_field_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "",
            "error": "account locked"
        })))
        .mount(&mock_server)
        .await;

    let err = authenticator()
        .authenticate(&mock_server.uri(), "analyst", "hunter2")
        .await
        .unwrap_err();

    match err {
        Error::Auth { message } => assert_eq!(message, "account locked"),
        other => panic!("Expected Auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_warnings_do_not_fail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "warnings": "password expires soon"
        })))
        .mount(&mock_server)
        .await;

    let credential = authenticator()
        .authenticate(&mock_server.uri(), "analyst", "hunter2")
        .await
        .unwrap();
    assert_eq!(credential.token, "tok");
    assert!(credential.expires_at.is_none());
}

#[tokio::test]
async fn test_missing_token_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&mock_server)
        .await;

    let err = authenticator()
        .authenticate(&mock_server.uri(), "analyst", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
}

#[tokio::test]
async fn test_unparseable_body_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = authenticator()
        .authenticate(&mock_server.uri(), "analyst", "hunter2")
        .await
        .unwrap_err();

    match err {
        Error::Auth { message } => assert!(message.contains("unrecognized token response")),
        other => panic!("Expected Auth error, got {other:?}"),
    }
}
