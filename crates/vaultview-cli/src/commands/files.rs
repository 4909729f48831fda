//! Files commands - list, upload, delete, and download
//!
//! Every command navigates to the dashboard view first, so the route
//! guard applies exactly as it would in a browser: without a session the
//! command is redirected and exits with an error instead of touching the
//! collection.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::debug;

use vaultview_core::domain::{FileId, StorageError};
use vaultview_dashboard::{Dashboard, RouteDecision, UploadRequest};

use crate::commands::{build_dashboard, load_config};
use crate::output::{get_formatter, OutputFormat, OutputFormatter};

#[derive(Debug, Subcommand)]
pub enum FilesCommand {
    /// List stored files
    List {
        /// Show only files whose name contains this text
        #[arg(long, short)]
        filter: Option<String>,
    },
    /// Upload a local file
    Upload {
        /// Path of the file to upload
        path: PathBuf,
    },
    /// Delete a stored file by id
    Delete {
        /// Id of the file to delete
        id: String,
    },
    /// Download a stored file by id
    Download {
        /// Id of the file to download
        id: String,
        /// Output path (defaults to the id in the current directory)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

impl FilesCommand {
    pub async fn execute(&self, config_path: Option<&str>, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format == OutputFormat::Json);
        let config = load_config(config_path);
        let dashboard = build_dashboard(&config).await?;

        // The guard decides whether the dashboard view is reachable at all
        match dashboard.navigate("/dashboard").await {
            Ok(RouteDecision::Render(_)) => {}
            Ok(RouteDecision::RedirectToLogin) => {
                fmt.error("Not logged in. Run `vaultview auth login` first");
                std::process::exit(1);
            }
            Err(e) => {
                fmt.error(&format!("Could not load files: {}", e));
                std::process::exit(1);
            }
        }

        match self {
            FilesCommand::List { filter } => {
                if let Some(filter) = filter {
                    dashboard.set_filter(filter).await;
                }
                let files = dashboard.visible_files().await;
                fmt.print_files(&files);
                Ok(())
            }
            FilesCommand::Upload { path } => self.execute_upload(&dashboard, path, &*fmt).await,
            FilesCommand::Delete { id } => {
                let id: FileId = id.parse().context("Invalid file id")?;
                match dashboard.delete_file(&id).await {
                    Ok(()) => {
                        fmt.success(&format!("Deleted {}", id));
                        Ok(())
                    }
                    Err(StorageError::NotFound(id)) => {
                        fmt.error(&format!("No file with id {}", id));
                        std::process::exit(1);
                    }
                    Err(e) => {
                        fmt.error(&format!("Delete failed: {}", e));
                        std::process::exit(1);
                    }
                }
            }
            FilesCommand::Download { id, out } => {
                let id: FileId = id.parse().context("Invalid file id")?;
                match dashboard.download_file(&id).await {
                    Ok(bytes) => {
                        let out = out
                            .clone()
                            .unwrap_or_else(|| PathBuf::from(id.as_str()));
                        std::fs::write(&out, &bytes).with_context(|| {
                            format!("Failed to write {}", out.display())
                        })?;
                        fmt.success(&format!(
                            "Downloaded {} ({} bytes) to {}",
                            id,
                            bytes.len(),
                            out.display()
                        ));
                        Ok(())
                    }
                    Err(StorageError::NotFound(id)) => {
                        fmt.error(&format!("No file with id {}", id));
                        std::process::exit(1);
                    }
                    Err(e) => {
                        fmt.error(&format!("Download failed: {}", e));
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    /// Runs the simulated upload while rendering its progress sequence
    async fn execute_upload(
        &self,
        dashboard: &Dashboard,
        path: &PathBuf,
        fmt: &dyn OutputFormatter,
    ) -> Result<()> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .context("Path has no usable file name")?
            .to_string();

        let mut progress_rx = dashboard.subscribe_upload();
        dashboard
            .start_upload(UploadRequest {
                name: name.clone(),
                size_bytes: metadata.len(),
            })
            .await
            .context("Upload rejected")?;

        // Render the progress sequence until the task returns to idle
        loop {
            let progress = *progress_rx.borrow_and_update();
            if !progress.active {
                break;
            }
            debug!(percent = progress.percent, "Uploading");
            print!("\r  Uploading {}... {:>3}%", name, progress.percent);
            std::io::stdout().flush().ok();
            if progress_rx.changed().await.is_err() {
                break;
            }
        }
        println!();

        fmt.success(&format!("Uploaded {}", name));
        fmt.print_files(&dashboard.visible_files().await);
        Ok(())
    }
}
