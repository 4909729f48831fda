//! Route guard - per-navigation access decisions
//!
//! A two-level access model: `Open` views render unconditionally, `Guarded`
//! views require an authenticated session. The guard only ever reads the
//! session store; it is never a writer of authentication state.
//!
//! Unknown paths are treated as unauthenticated-equivalent and redirected
//! to the login view regardless of session state (catch-all fallback).
//! The originally requested path is discarded on redirect; there is no
//! return-to-url preservation.

use std::sync::Arc;

use tracing::debug;

use crate::session::SessionStore;

/// The known views of the dashboard client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Public landing page
    Home,
    /// Login form
    Login,
    /// The file dashboard (authenticated users only)
    Dashboard,
}

impl Route {
    /// Resolves a navigation path to a known route
    ///
    /// Trailing slashes are ignored except for the root path itself.
    pub fn from_path(path: &str) -> Option<Self> {
        let normalized = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match normalized {
            "/" => Some(Route::Home),
            "/login" => Some(Route::Login),
            "/dashboard" => Some(Route::Dashboard),
            _ => None,
        }
    }

    /// Returns the canonical path of this route
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Returns the access level required to render this route
    pub fn access(&self) -> Access {
        match self {
            Route::Home | Route::Login => Access::Open,
            Route::Dashboard => Access::Guarded,
        }
    }
}

/// Access level of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Renders unconditionally
    Open,
    /// Requires an authenticated session
    Guarded,
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// The requested view may render
    Render(Route),
    /// Navigation is redirected to the login view
    RedirectToLogin,
}

/// Decides, per navigation, whether a requested view is reachable
pub struct RouteGuard {
    session: Arc<SessionStore>,
}

impl RouteGuard {
    /// Creates a guard reading from the given session store
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// Resolves a navigation request against the current session
    pub async fn resolve(&self, path: &str) -> RouteDecision {
        let Some(route) = Route::from_path(path) else {
            debug!(path = %path, "Unknown path, redirecting to login");
            return RouteDecision::RedirectToLogin;
        };

        match route.access() {
            Access::Open => RouteDecision::Render(route),
            Access::Guarded => {
                if self.session.is_authenticated().await {
                    RouteDecision::Render(route)
                } else {
                    debug!(path = %path, "Guarded view without session, redirecting to login");
                    RouteDecision::RedirectToLogin
                }
            }
        }
    }
}
