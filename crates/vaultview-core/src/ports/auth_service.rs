//! Authentication service port (driven/secondary port)
//!
//! This module defines the interface to the remote Authentication Service.
//! The core delegates every credential check to this port; it never inspects
//! tokens beyond their presence.
//!
//! ## Design Notes
//!
//! - Returns the domain-level [`AuthError`] rather than `anyhow::Result`:
//!   callers must distinguish user-correctable rejections from retryable
//!   outages, so the classification belongs to the contract.
//! - Implementations should map transport failures (connect errors, 5xx)
//!   to [`AuthError::ServiceUnavailable`]. Call-site timeouts are applied
//!   by the session store.

use crate::domain::{AuthError, AuthToken, Username};

/// Port trait for credential verification
#[async_trait::async_trait]
pub trait IAuthService: Send + Sync {
    /// Verifies credentials against the remote service
    ///
    /// # Arguments
    /// * `username` - The account's username
    /// * `password` - The plaintext password, consumed only by the remote call
    ///
    /// # Returns
    /// An opaque token on success. The core treats the token as a presence
    /// marker only; validity checking is owned by the remote service.
    async fn verify(&self, username: &Username, password: &str) -> Result<AuthToken, AuthError>;
}
