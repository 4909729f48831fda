//! CLI command implementations
//!
//! Each module holds one subcommand tree. All of them drive the core
//! through the same [`Dashboard`] facade built by [`build_dashboard`].

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use vaultview_api::{HttpAuthService, HttpFileStorage};
use vaultview_core::config::Config;
use vaultview_dashboard::Dashboard;
use vaultview_store::{SqliteLocalStore, StorePool};

pub mod auth;
pub mod files;
pub mod theme;

/// Loads the configuration, preferring an explicit `--config` path
pub fn load_config(config_path: Option<&str>) -> Config {
    let path = config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(Config::default_path);
    Config::load_or_default(&path)
}

/// Assembles the dashboard core against the configured services
///
/// Wires the HTTP adapters for the remote authentication and storage
/// services and the SQLite-backed local store, then restores any
/// persisted session so commands see the same state a reloaded browser
/// tab would.
pub async fn build_dashboard(config: &Config) -> Result<Dashboard> {
    let timeout = Duration::from_secs(config.services.request_timeout_secs);
    let auth = Arc::new(HttpAuthService::new(
        config.services.auth_url.clone(),
        Some(timeout),
    ));
    let storage = Arc::new(HttpFileStorage::new(
        config.services.storage_url.clone(),
        Some(timeout),
    ));

    let db_path = config.store.resolved_db_path();
    let pool = StorePool::new(Path::new(&db_path))
        .await
        .context("Failed to open local store")?;
    let local_store = Arc::new(SqliteLocalStore::new(pool.pool().clone()));

    let dashboard = Dashboard::new(auth, storage, local_store, config);
    dashboard.restore().await;
    Ok(dashboard)
}
