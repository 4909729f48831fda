//! Session domain entity
//!
//! This module defines the Session entity which tracks whether the current
//! user is authenticated and, when known, who they are.
//!
//! A session is created by a successful login, may be reconstituted from a
//! persisted session marker after a reload (in which case the identity is
//! unknown), and is destroyed by logout.

use serde::{Deserialize, Serialize};

use super::newtypes::Username;

/// The identity of the authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    username: Username,
}

impl Identity {
    /// Creates an identity for the given username
    pub fn new(username: Username) -> Self {
        Self { username }
    }

    /// Returns the username
    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// Authentication state of the current user
///
/// The identity is optional even when authenticated: a session restored
/// from the persisted marker knows only that a login happened, not who
/// performed it (the marker is presence-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    authenticated: bool,
    identity: Option<Identity>,
}

impl Session {
    /// Creates an unauthenticated session with no identity
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            identity: None,
        }
    }

    /// Creates an authenticated session for a known user (explicit login)
    pub fn for_user(identity: Identity) -> Self {
        Self {
            authenticated: true,
            identity: Some(identity),
        }
    }

    /// Creates an authenticated session with unknown identity
    ///
    /// Used when the session is reconstituted from the persisted marker.
    pub fn restored() -> Self {
        Self {
            authenticated: true,
            identity: None,
        }
    }

    /// Returns true if the session is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns the identity, if known
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.authenticated, &self.identity) {
            (true, Some(identity)) => write!(f, "authenticated as {}", identity.username()),
            (true, None) => write!(f, "authenticated"),
            (false, _) => write!(f, "anonymous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> Identity {
        Identity::new(Username::new(name).unwrap())
    }

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.identity().is_none());
    }

    #[test]
    fn test_for_user_session() {
        let session = Session::for_user(identity("alice"));
        assert!(session.is_authenticated());
        assert_eq!(session.identity().unwrap().username().as_str(), "alice");
    }

    #[test]
    fn test_restored_session_has_no_identity() {
        let session = Session::restored();
        assert!(session.is_authenticated());
        assert!(session.identity().is_none());
    }

    #[test]
    fn test_default_is_anonymous() {
        assert_eq!(Session::default(), Session::anonymous());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Session::anonymous()), "anonymous");
        assert_eq!(format!("{}", Session::restored()), "authenticated");
        assert_eq!(
            format!("{}", Session::for_user(identity("bob"))),
            "authenticated as bob"
        );
    }
}
