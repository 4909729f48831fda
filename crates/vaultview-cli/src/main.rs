//! VaultView CLI - Command-line host for the dashboard core
//!
//! Provides commands for:
//! - Authentication (login, logout, session status)
//! - Browsing, uploading, deleting, and downloading files
//! - The persisted theme preference
//!
//! The CLI is a thin driving adapter: every command goes through the
//! `Dashboard` facade and its route guard, exactly as a graphical shell
//! would.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{auth::AuthCommand, files::FilesCommand, theme::ThemeCommand};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "vaultview", version, about = "Client for the VaultView encrypted file store")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authentication commands
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Browse and manage stored files
    #[command(subcommand)]
    Files(FilesCommand),
    /// View or set the theme preference
    Theme(ThemeCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Auth(cmd) => cmd.execute(cli.config.as_deref(), format).await,
        Commands::Files(cmd) => cmd.execute(cli.config.as_deref(), format).await,
        Commands::Theme(cmd) => cmd.execute(cli.config.as_deref(), format).await,
    }
}
