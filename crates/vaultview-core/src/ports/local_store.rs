//! Local store port (driven/secondary port)
//!
//! This module defines the interface for durable client-side storage: the
//! session marker that lets an authenticated session survive a reload, and
//! the user's theme preference.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because storage failures are adapter-specific
//!   (SQLite, filesystem) and don't need domain-level classification.
//! - The session marker is presence-only: `load_session_marker` returning
//!   `Some` is what makes a reloaded session authenticated. The token's
//!   validity is never checked by the core.

use crate::domain::{AuthToken, ThemePreference};

/// Port trait for durable client-side storage
#[async_trait::async_trait]
pub trait ILocalStore: Send + Sync {
    /// Persists the session marker
    ///
    /// Overwrites any previous marker; there is at most one.
    async fn store_session_marker(&self, token: &AuthToken) -> anyhow::Result<()>;

    /// Loads the session marker, if one was persisted
    async fn load_session_marker(&self) -> anyhow::Result<Option<AuthToken>>;

    /// Removes the session marker
    ///
    /// Idempotent: clearing an absent marker succeeds.
    async fn clear_session_marker(&self) -> anyhow::Result<()>;

    /// Persists the theme preference
    async fn set_theme(&self, theme: ThemePreference) -> anyhow::Result<()>;

    /// Loads the theme preference, if one was persisted
    async fn theme(&self) -> anyhow::Result<Option<ThemePreference>>;
}
