//! VaultView Store - Durable client storage
//!
//! SQLite-based persistence for:
//! - The session marker (presence of a login token)
//! - User preferences (theme)
//!
//! ## Architecture
//!
//! This crate implements the `ILocalStore` port from `vaultview-core`
//! using SQLite as the storage backend. It is a driven (secondary) adapter
//! in the hexagonal architecture, standing in for the browser's durable
//! client storage.
//!
//! ## Key Components
//!
//! - [`StorePool`] - Connection pool with migration support
//! - [`SqliteLocalStore`] - Full `ILocalStore` implementation
//! - [`StoreError`] - Error types for store operations
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use vaultview_store::{SqliteLocalStore, StorePool};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let pool = StorePool::new(Path::new("/home/user/.local/share/vaultview/vaultview.db")).await?;
//! let store = SqliteLocalStore::new(pool.pool().clone());
//! // Use store as ILocalStore...
//! # Ok(())
//! # }
//! ```

pub mod pool;
pub mod store;

pub use pool::StorePool;
pub use store::SqliteLocalStore;

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to establish a database connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A database query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::QueryFailed(e.to_string())
    }
}
