//! SQLite implementation of ILocalStore
//!
//! This module provides the concrete SQLite-based implementation of the
//! local store port defined in vaultview-core.
//!
//! ## Type Mapping
//!
//! | Domain Type      | SQL Type | Strategy                                |
//! |------------------|----------|-----------------------------------------|
//! | AuthToken        | TEXT     | String via `.as_str()` / `AuthToken::new()` |
//! | ThemePreference  | TEXT     | String via `.as_str()` / `FromStr`      |

use sqlx::{Row, SqlitePool};

use vaultview_core::domain::{AuthToken, ThemePreference};
use vaultview_core::ports::ILocalStore;

use crate::StoreError;

/// Preference key under which the theme choice is stored
const THEME_KEY: &str = "theme";

/// SQLite-based implementation of the local store port
///
/// Persists the session marker and user preferences. All operations go
/// through a connection pool.
pub struct SqliteLocalStore {
    pool: SqlitePool,
}

impl SqliteLocalStore {
    /// Creates a new store instance with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn get_preference(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| row.get::<String, _>("value")))
    }

    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO preferences (key, value) VALUES (?, ?)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ILocalStore for SqliteLocalStore {
    async fn store_session_marker(&self, token: &AuthToken) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO session_marker (id, token) VALUES (1, ?)
             ON CONFLICT (id) DO UPDATE SET token = excluded.token",
        )
        .bind(token.as_str())
        .execute(&self.pool)
        .await
        .map_err(StoreError::from)?;

        tracing::debug!("Session marker stored");
        Ok(())
    }

    async fn load_session_marker(&self) -> anyhow::Result<Option<AuthToken>> {
        let row = sqlx::query("SELECT token FROM session_marker WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;

        Ok(row.map(|row| AuthToken::new(row.get::<String, _>("token"))))
    }

    async fn clear_session_marker(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM session_marker WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;

        tracing::debug!("Session marker cleared");
        Ok(())
    }

    async fn set_theme(&self, theme: ThemePreference) -> anyhow::Result<()> {
        self.set_preference(THEME_KEY, theme.as_str()).await?;
        Ok(())
    }

    async fn theme(&self) -> anyhow::Result<Option<ThemePreference>> {
        let value = self.get_preference(THEME_KEY).await?;
        match value {
            None => Ok(None),
            Some(raw) => Ok(Some(raw.parse()?)),
        }
    }
}
