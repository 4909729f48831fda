//! Session store - the sole owner of authentication state
//!
//! An explicitly constructed object with a defined lifecycle: created with
//! its port dependencies, optionally restored from the persisted marker,
//! then driven through login/logout. The route guard and views receive it
//! by reference; nothing reaches authentication state ambiently.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use vaultview_core::domain::{AuthError, Identity, Session, Username};
use vaultview_core::ports::{IAuthService, ILocalStore};

/// Holds the current [`Session`] and exposes login/logout operations
///
/// Credential checks are delegated to the authentication service port and
/// bounded by a timeout; an elapsed timeout surfaces as
/// [`AuthError::ServiceUnavailable`] rather than hanging the caller.
///
/// A successful login persists a session marker to the local store so a
/// reload keeps the session authenticated until explicit logout. The
/// marker's presence, not its validity, is what restore checks.
pub struct SessionStore {
    auth: Arc<dyn IAuthService>,
    local_store: Arc<dyn ILocalStore>,
    verify_timeout: Duration,
    session: RwLock<Session>,
}

impl SessionStore {
    /// Creates a session store in the anonymous state
    ///
    /// # Arguments
    /// * `auth` - Authentication service for credential verification
    /// * `local_store` - Durable storage for the session marker
    /// * `verify_timeout` - Upper bound on a single verification call
    pub fn new(
        auth: Arc<dyn IAuthService>,
        local_store: Arc<dyn ILocalStore>,
        verify_timeout: Duration,
    ) -> Self {
        Self {
            auth,
            local_store,
            verify_timeout,
            session: RwLock::new(Session::anonymous()),
        }
    }

    /// Reconstitutes the session from the persisted marker, if present
    ///
    /// A present marker yields an authenticated session with unknown
    /// identity. A store failure is logged and treated as no marker.
    pub async fn restore(&self) -> Session {
        let marker = match self.local_store.load_session_marker().await {
            Ok(marker) => marker,
            Err(e) => {
                warn!(error = %e, "Failed to read session marker, staying anonymous");
                None
            }
        };

        if marker.is_some() {
            let mut session = self.session.write().await;
            *session = Session::restored();
            info!("Session restored from persisted marker");
            return session.clone();
        }

        debug!("No session marker found");
        self.session.read().await.clone()
    }

    /// Attempts to log in with the given credentials
    ///
    /// On success the session becomes authenticated with the user's
    /// identity and the marker is persisted. On failure the session state
    /// is left exactly as it was.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] if the service rejects the pair;
    /// [`AuthError::ServiceUnavailable`] if the service cannot be reached
    /// or the verification timed out.
    pub async fn login(
        &self,
        username: Username,
        password: &str,
    ) -> Result<Session, AuthError> {
        let verification = self.auth.verify(&username, password);
        let token = match tokio::time::timeout(self.verify_timeout, verification).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(username = %username, "Credential verification timed out");
                return Err(AuthError::ServiceUnavailable(
                    "verification timed out".to_string(),
                ));
            }
        };

        // The marker makes the login survive a reload; a failed write only
        // costs that persistence, not the login itself
        if let Err(e) = self.local_store.store_session_marker(&token).await {
            warn!(error = %e, "Failed to persist session marker");
        }

        let mut session = self.session.write().await;
        *session = Session::for_user(Identity::new(username.clone()));
        info!(username = %username, "Login succeeded");
        Ok(session.clone())
    }

    /// Unconditionally clears the session
    ///
    /// Idempotent: logging out an anonymous session is a no-op.
    pub async fn logout(&self) {
        {
            let mut session = self.session.write().await;
            *session = Session::anonymous();
        }

        if let Err(e) = self.local_store.clear_session_marker().await {
            warn!(error = %e, "Failed to clear session marker");
        }

        info!("Logged out");
    }

    /// Returns true if the current session is authenticated
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Returns a snapshot of the current session
    pub async fn current(&self) -> Session {
        self.session.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedAuthService, InMemoryLocalStore, SlowAuthService};

    fn username(name: &str) -> Username {
        Username::new(name).unwrap()
    }

    fn store_with(auth: Arc<dyn IAuthService>) -> (SessionStore, Arc<InMemoryLocalStore>) {
        let local = Arc::new(InMemoryLocalStore::new());
        let store = SessionStore::new(auth, local.clone(), Duration::from_secs(1));
        (store, local)
    }

    #[tokio::test]
    async fn test_starts_anonymous() {
        let (store, _) = store_with(Arc::new(FixedAuthService::new("alice", "pw")));
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_login_success_sets_identity_and_marker() {
        let (store, local) = store_with(Arc::new(FixedAuthService::new("alice", "pw")));

        let session = store.login(username("alice"), "pw").await.unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.identity().unwrap().username().as_str(), "alice");
        assert!(store.is_authenticated().await);
        assert!(local.marker().is_some());
    }

    #[tokio::test]
    async fn test_login_failure_leaves_state_unchanged() {
        let (store, local) = store_with(Arc::new(FixedAuthService::new("alice", "pw")));

        let err = store.login(username("alice"), "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!store.is_authenticated().await);
        assert!(local.marker().is_none());
    }

    #[tokio::test]
    async fn test_login_times_out_as_service_unavailable() {
        let auth = Arc::new(SlowAuthService::new(Duration::from_secs(60)));
        let local = Arc::new(InMemoryLocalStore::new());
        let store = SessionStore::new(auth, local, Duration::from_millis(20));

        let err = store.login(username("alice"), "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::ServiceUnavailable(_)));
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (store, local) = store_with(Arc::new(FixedAuthService::new("alice", "pw")));
        store.login(username("alice"), "pw").await.unwrap();

        store.logout().await;
        assert!(!store.is_authenticated().await);
        assert!(local.marker().is_none());

        // Second logout is a no-op
        store.logout().await;
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_with_marker_authenticates_without_identity() {
        let (store, local) = store_with(Arc::new(FixedAuthService::new("alice", "pw")));
        local.seed_marker("tok-persisted");

        let session = store.restore().await;
        assert!(session.is_authenticated());
        assert!(session.identity().is_none());
        assert!(store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_without_marker_stays_anonymous() {
        let (store, _) = store_with(Arc::new(FixedAuthService::new("alice", "pw")));
        let session = store.restore().await;
        assert!(!session.is_authenticated());
    }
}
