//! Authentication service HTTP adapter
//!
//! Implements the `IAuthService` port against the remote authentication
//! endpoint. Credentials go out as JSON; an opaque token comes back.
//!
//! ## Error mapping
//!
//! | Condition                       | Result                          |
//! |---------------------------------|---------------------------------|
//! | 200/201 with token body         | `Ok(AuthToken)`                 |
//! | 401 / 403                       | `AuthError::InvalidCredentials` |
//! | Other status, connect, timeout  | `AuthError::ServiceUnavailable` |

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vaultview_core::domain::{AuthError, AuthToken, Username};
use vaultview_core::ports::IAuthService;

/// Default per-request timeout when none is configured
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body for credential verification
#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Response body carrying the issued token
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    token: String,
}

/// HTTP client for the remote authentication service
pub struct HttpAuthService {
    client: Client,
    base_url: String,
}

impl HttpAuthService {
    /// Creates an adapter for the service at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Service root, without a trailing slash
    /// * `timeout` - Per-request timeout (None uses the default)
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl IAuthService for HttpAuthService {
    async fn verify(&self, username: &Username, password: &str) -> Result<AuthToken, AuthError> {
        let url = format!("{}/auth/verify", self.base_url);
        debug!(username = %username, "Verifying credentials");

        let response = self
            .client
            .post(&url)
            .json(&VerifyRequest {
                username: username.as_str(),
                password,
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Authentication request failed");
                AuthError::ServiceUnavailable(e.to_string())
            })?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let body: VerifyResponse = response.json().await.map_err(|e| {
                    AuthError::ServiceUnavailable(format!("Malformed token response: {}", e))
                })?;
                debug!(username = %username, "Credentials verified");
                Ok(AuthToken::new(body.token))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!(username = %username, "Credentials rejected");
                Err(AuthError::InvalidCredentials)
            }
            status => {
                warn!(status = %status, "Unexpected authentication response");
                Err(AuthError::ServiceUnavailable(format!(
                    "Unexpected status {}",
                    status
                )))
            }
        }
    }
}
