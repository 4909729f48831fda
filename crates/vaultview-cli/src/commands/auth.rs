//! Auth commands - Login, Logout, and Status for the VaultView session
//!
//! `login` verifies credentials against the remote authentication service
//! and persists the session marker; `logout` clears both; `status` shows
//! what a freshly restored session looks like.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use vaultview_core::domain::{AuthError, Username};

use crate::commands::{build_dashboard, load_config};
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in to the VaultView service
    Login {
        /// Account username
        #[arg(long, short)]
        username: String,
        /// Account password (prompted if omitted)
        #[arg(long, short)]
        password: Option<String>,
    },
    /// End the session and clear the persisted marker
    Logout,
    /// Show the current session state
    Status,
}

impl AuthCommand {
    pub async fn execute(&self, config_path: Option<&str>, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format == OutputFormat::Json);
        let config = load_config(config_path);

        match self {
            AuthCommand::Login { username, password } => {
                let dashboard = build_dashboard(&config).await?;
                let username = Username::new(username.as_str())
                    .context("Username must not be empty")?;
                let password = match password {
                    Some(password) => password.clone(),
                    None => prompt_password()?,
                };

                info!(username = %username, "Logging in");
                match dashboard.login(username, &password).await {
                    Ok(session) => {
                        fmt.success(&format!("Logged in ({})", session));
                        Ok(())
                    }
                    Err(AuthError::InvalidCredentials) => {
                        fmt.error("Invalid username or password");
                        std::process::exit(1);
                    }
                    Err(AuthError::ServiceUnavailable(reason)) => {
                        fmt.error(&format!(
                            "Authentication service unavailable, try again later ({})",
                            reason
                        ));
                        std::process::exit(1);
                    }
                }
            }
            AuthCommand::Logout => {
                let dashboard = build_dashboard(&config).await?;
                dashboard.logout().await;
                fmt.success("Logged out");
                Ok(())
            }
            AuthCommand::Status => {
                let dashboard = build_dashboard(&config).await?;
                let session = dashboard.session().await;
                let theme = dashboard.theme().await;
                fmt.info(&format!("Session: {}", session));
                fmt.info(&format!("Theme:   {}", theme));
                Ok(())
            }
        }
    }
}

/// Reads the password from the terminal without taking it on argv
fn prompt_password() -> Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
