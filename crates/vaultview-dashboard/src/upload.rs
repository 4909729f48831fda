//! Upload progress simulator
//!
//! Models the time-based `Idle -> Active -> Idle` upload lifecycle: a
//! cancellable task advances progress in fixed increments on a periodic
//! tick and, on reaching 100, synthesizes a [`FileRecord`] and commits it
//! into the collection manager. At most one task is in flight per session;
//! starting another while active is rejected rather than interleaved.
//!
//! Progress is published through a watch channel as a lazy finite sequence
//! of [`UploadProgress`] values; cancellation is explicit via a
//! [`CancellationToken`], never leaked timers.
//!
//! This component is a placeholder for a real transfer+encryption
//! pipeline; the `IFileStorage::upload` contract is what it stands in for.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use vaultview_core::domain::FileRecord;

use crate::collection::FileCollectionManager;

/// Observable progress of the upload task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Completion percentage, 0..=100
    pub percent: u8,
    /// True while a task is in flight
    pub active: bool,
}

impl UploadProgress {
    /// The idle state: no task, zero progress
    pub fn idle() -> Self {
        Self {
            percent: 0,
            active: false,
        }
    }
}

/// Describes the file a user selected for upload
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File name, including extension
    pub name: String,
    /// Size of the selected file in bytes
    pub size_bytes: u64,
}

/// Errors returned by the simulator's commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// At most one upload task may be in flight at a time
    #[error("An upload is already in progress")]
    AlreadyActive,
}

struct ActiveTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Drives the simulated upload lifecycle
pub struct UploadSimulator {
    collection: Arc<FileCollectionManager>,
    tick: Duration,
    increment: u8,
    progress_tx: watch::Sender<UploadProgress>,
    active: Arc<Mutex<Option<ActiveTask>>>,
}

impl UploadSimulator {
    /// Creates an idle simulator committing into the given collection
    ///
    /// # Arguments
    /// * `collection` - Where completed uploads are committed
    /// * `tick` - Interval between progress advances
    /// * `increment` - Percentage points added per tick (clamped to >= 1)
    pub fn new(collection: Arc<FileCollectionManager>, tick: Duration, increment: u8) -> Self {
        let (progress_tx, _) = watch::channel(UploadProgress::idle());
        Self {
            collection,
            tick,
            increment: increment.max(1),
            progress_tx,
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Starts a simulated upload for the selected file
    ///
    /// # Errors
    ///
    /// [`UploadError::AlreadyActive`] if a task is already in flight; the
    /// in-flight task's progress trajectory is unaffected by the rejected
    /// request.
    pub async fn start(&self, request: UploadRequest) -> Result<(), UploadError> {
        let mut slot = self.active.lock().await;
        if slot.is_some() {
            debug!(name = %request.name, "Rejecting upload start while a task is active");
            return Err(UploadError::AlreadyActive);
        }

        let cancel = CancellationToken::new();
        let handle = self.spawn_task(request, cancel.clone());
        *slot = Some(ActiveTask { cancel, handle });
        Ok(())
    }

    /// Cancels the in-flight task, if any
    ///
    /// Discards accumulated progress without committing a record and waits
    /// for the task to wind down, so the simulator is observably idle when
    /// this returns. Cancelling while idle is a no-op.
    pub async fn cancel(&self) {
        let task = self.active.lock().await.take();
        if let Some(task) = task {
            task.cancel.cancel();
            // The task resets progress on its way out; wait for it so the
            // caller never observes a half-cancelled state
            let _ = task.handle.await;
            info!("Upload cancelled");
        }
    }

    /// Returns the current progress
    pub fn progress(&self) -> UploadProgress {
        *self.progress_tx.borrow()
    }

    /// Returns true while a task is in flight
    pub async fn is_active(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// Subscribes to the progress sequence
    ///
    /// Each task emits a monotonically non-decreasing sequence of active
    /// values terminating at 100, followed by the idle state.
    pub fn subscribe(&self) -> watch::Receiver<UploadProgress> {
        self.progress_tx.subscribe()
    }

    fn spawn_task(&self, request: UploadRequest, cancel: CancellationToken) -> JoinHandle<()> {
        let collection = Arc::clone(&self.collection);
        let progress_tx = self.progress_tx.clone();
        let active = Arc::clone(&self.active);
        let tick = self.tick;
        let increment = self.increment;

        progress_tx.send_replace(UploadProgress {
            percent: 0,
            active: true,
        });
        debug!(name = %request.name, "Upload task started");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // Consume the immediate first tick so progress starts advancing
            // one full period after start
            interval.tick().await;

            let mut percent: u8 = 0;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!(name = %request.name, percent, "Upload task cancelled, discarding progress");
                        break;
                    }
                    _ = interval.tick() => {
                        percent = percent.saturating_add(increment).min(100);
                        progress_tx.send_replace(UploadProgress { percent, active: true });

                        if percent >= 100 {
                            let record = FileRecord::uploaded(
                                &request.name,
                                request.size_bytes,
                                Utc::now().date_naive(),
                            );
                            let id = record.id().clone();
                            match collection.add(record).await {
                                Ok(()) => {
                                    info!(name = %request.name, id = %id, "Upload completed, record committed");
                                }
                                Err(e) => {
                                    // Generated ids should never collide; if one
                                    // does, the collection stays intact and the
                                    // upload surfaces as failed
                                    error!(error = %e, "Completed upload could not be committed");
                                }
                            }
                            break;
                        }
                    }
                }
            }

            progress_tx.send_replace(UploadProgress::idle());
            *active.lock().await = None;
        })
    }
}
