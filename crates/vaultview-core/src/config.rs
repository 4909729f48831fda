//! Configuration module for VaultView.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, and defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for VaultView.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote collaborator service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the authentication service.
    pub auth_url: String,
    /// Base URL of the file storage service.
    pub storage_url: String,
    /// Seconds before an outstanding login verification is abandoned and
    /// surfaced as a service-unavailable error.
    pub request_timeout_secs: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            auth_url: "http://localhost:8700".to_string(),
            storage_url: "http://localhost:8701".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Simulated upload pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Milliseconds between progress ticks.
    pub tick_ms: u64,
    /// Percentage points added per tick.
    pub increment: u8,
}

impl Default for UploadConfig {
    fn default() -> Self {
        // 5% every 100ms: a full upload simulates in about two seconds
        Self {
            tick_ms: 100,
            increment: 5,
        }
    }
}

/// Durable client store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file. `None` uses the platform data dir.
    pub db_path: Option<PathBuf>,
}

impl StoreConfig {
    /// Resolves the database path, falling back to the platform data dir.
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("vaultview")
                .join("vaultview.db")
        })
    }
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Default config file location (`~/.config/vaultview/config.yaml`).
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vaultview")
            .join("config.yaml")
    }

    /// Serialize the configuration to YAML.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
