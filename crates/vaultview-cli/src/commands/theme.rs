//! Theme command - view or set the persisted theme preference

use anyhow::{Context, Result};
use clap::Args;

use vaultview_core::domain::ThemePreference;

use crate::commands::{build_dashboard, load_config};
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct ThemeCommand {
    /// Preference to set ("dark" or "light"); omit to show the current one
    preference: Option<String>,
}

impl ThemeCommand {
    pub async fn execute(&self, config_path: Option<&str>, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format == OutputFormat::Json);
        let config = load_config(config_path);
        let dashboard = build_dashboard(&config).await?;

        match &self.preference {
            Some(raw) => {
                let theme: ThemePreference =
                    raw.parse().context("Expected \"dark\" or \"light\"")?;
                dashboard.set_theme(theme).await?;
                fmt.success(&format!("Theme set to {}", theme));
            }
            None => {
                fmt.info(&format!("Theme: {}", dashboard.theme().await));
            }
        }
        Ok(())
    }
}
