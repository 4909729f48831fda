//! Integration tests for the authentication service adapter

use std::time::Duration;

use vaultview_api::HttpAuthService;
use vaultview_core::domain::{AuthError, Username};
use vaultview_core::ports::IAuthService;

use crate::common::setup_auth_mock;

#[tokio::test]
async fn test_verify_accepts_valid_credentials() {
    let (_server, service) = setup_auth_mock("alice", "pw", "tok-alice-1").await;

    let username = Username::new("alice").unwrap();
    let token = service.verify(&username, "pw").await.unwrap();
    assert_eq!(token.as_str(), "tok-alice-1");
}

#[tokio::test]
async fn test_verify_rejects_wrong_password() {
    let (_server, service) = setup_auth_mock("alice", "pw", "tok-alice-1").await;

    let username = Username::new("alice").unwrap();
    let err = service.verify(&username, "wrong").await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
}

#[tokio::test]
async fn test_verify_rejects_unknown_user() {
    let (_server, service) = setup_auth_mock("alice", "pw", "tok-alice-1").await;

    let username = Username::new("mallory").unwrap();
    let err = service.verify(&username, "pw").await.unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
}

#[tokio::test]
async fn test_verify_maps_server_error_to_unavailable() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/verify"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = HttpAuthService::new(server.uri(), None);
    let username = Username::new("alice").unwrap();
    let err = service.verify(&username, "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn test_verify_unreachable_service_is_unavailable() {
    // Nothing listens on this port; the connect fails fast
    let service = HttpAuthService::new(
        "http://127.0.0.1:1",
        Some(Duration::from_millis(500)),
    );
    let username = Username::new("alice").unwrap();
    let err = service.verify(&username, "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::ServiceUnavailable(_)));
}
