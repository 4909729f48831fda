//! Shared test helpers for API adapter integration tests
//!
//! Provides wiremock-based mock server setup for the authentication and
//! file storage endpoints. Each helper mounts the necessary mock endpoints
//! and returns an adapter pointing at the mock server.

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vaultview_api::{HttpAuthService, HttpFileStorage};

/// Sets up a mock authentication service that accepts exactly one
/// username/password pair and returns the given token for it.
///
/// Any other credentials receive a 401.
pub async fn setup_auth_mock(
    username: &str,
    password: &str,
    token: &str,
) -> (MockServer, HttpAuthService) {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/verify"))
        .and(body_json(serde_json::json!({
            "username": username,
            "password": password,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": token,
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/verify"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid credentials",
        })))
        .mount(&server)
        .await;

    let service = HttpAuthService::new(server.uri(), None);
    (server, service)
}

/// Sets up a mock storage service with an empty endpoint set.
pub async fn setup_storage_mock() -> (MockServer, HttpFileStorage) {
    let server = MockServer::start().await;
    let storage = HttpFileStorage::new(server.uri(), None);
    (server, storage)
}

/// Mounts a file listing endpoint returning the given records.
pub async fn mount_listing(server: &MockServer, records: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(server)
        .await;
}

/// Mounts a download endpoint for a specific file id.
pub async fn mount_download(server: &MockServer, id: &str, content: &[u8]) {
    let path_str = format!("/files/{}/content", id);
    Mock::given(method("GET"))
        .and(path(&path_str))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(content.to_vec())
                .append_header("Content-Type", "application/octet-stream"),
        )
        .mount(server)
        .await;
}

/// Mounts an upload endpoint accepting PUT content for the given name.
pub async fn mount_upload(server: &MockServer, name: &str, response: serde_json::Value) {
    let path_str = format!("/files/{}/content", name);
    Mock::given(method("PUT"))
        .and(path(&path_str))
        .respond_with(ResponseTemplate::new(201).set_body_json(response))
        .mount(server)
        .await;
}

/// Mounts a delete endpoint for a specific file id.
pub async fn mount_delete(server: &MockServer, id: &str, status: u16) {
    let path_str = format!("/files/{}", id);
    Mock::given(method("DELETE"))
        .and(path(&path_str))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// A canonical listing payload with two records.
pub fn sample_listing() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "1",
            "name": "Project Report.pdf",
            "size": "2.4 MB",
            "type": "pdf",
            "lastModified": "2025-04-10",
            "encrypted": true
        },
        {
            "id": "2",
            "name": "Financial Data.xlsx",
            "size": "1.8 MB",
            "type": "xlsx",
            "lastModified": "2025-04-08",
            "encrypted": true
        }
    ])
}
