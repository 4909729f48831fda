//! Dashboard facade - the command surface offered to the presentation layer
//!
//! Wires the session store, route guard, file collection manager, and
//! upload simulator into one object the hosting view talks to. Every
//! command recovers service-boundary failures into returned values; no
//! failure from here should crash the host.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::sync::RwLock;
use tracing::{info, warn};

use vaultview_core::config::Config;
use vaultview_core::domain::{
    AuthError, FileId, FileRecord, Session, StorageError, ThemePreference, Username,
};
use vaultview_core::ports::{IAuthService, IFileStorage, ILocalStore};

use crate::collection::FileCollectionManager;
use crate::guard::{Route, RouteDecision, RouteGuard};
use crate::session::SessionStore;
use crate::upload::{UploadError, UploadProgress, UploadRequest, UploadSimulator};

/// The client core behind the dashboard views
///
/// Owns the four stateful components and exposes the reads and commands
/// the presentation layer needs: session state, the filtered file list,
/// upload progress, and the login/logout/upload/delete/download commands.
pub struct Dashboard {
    session: Arc<SessionStore>,
    guard: RouteGuard,
    collection: Arc<FileCollectionManager>,
    uploader: UploadSimulator,
    storage: Arc<dyn IFileStorage>,
    local_store: Arc<dyn ILocalStore>,
    filter: RwLock<String>,
}

impl Dashboard {
    /// Assembles the dashboard core from its port implementations
    pub fn new(
        auth: Arc<dyn IAuthService>,
        storage: Arc<dyn IFileStorage>,
        local_store: Arc<dyn ILocalStore>,
        config: &Config,
    ) -> Self {
        let session = Arc::new(SessionStore::new(
            auth,
            Arc::clone(&local_store),
            Duration::from_secs(config.services.request_timeout_secs),
        ));
        let guard = RouteGuard::new(Arc::clone(&session));
        let collection = Arc::new(FileCollectionManager::new(Arc::clone(&storage)));
        let uploader = UploadSimulator::new(
            Arc::clone(&collection),
            Duration::from_millis(config.upload.tick_ms),
            config.upload.increment,
        );

        Self {
            session,
            guard,
            collection,
            uploader,
            storage,
            local_store,
            filter: RwLock::new(String::new()),
        }
    }

    // --- Session commands ---

    /// Restores the session from the persisted marker, if present
    pub async fn restore(&self) -> Session {
        self.session.restore().await
    }

    /// Logs in with the given credentials
    pub async fn login(&self, username: Username, password: &str) -> Result<Session, AuthError> {
        self.session.login(username, password).await
    }

    /// Logs out: clears the session, the collection, and any view state
    ///
    /// An in-flight upload is cancelled; nothing from the old session
    /// survives. Idempotent.
    pub async fn logout(&self) {
        self.uploader.cancel().await;
        self.collection.clear().await;
        self.filter.write().await.clear();
        self.session.logout().await;
    }

    /// Returns a snapshot of the current session
    pub async fn session(&self) -> Session {
        self.session.current().await
    }

    // --- Navigation ---

    /// Resolves a navigation request through the route guard
    ///
    /// Rendering the dashboard view mounts it, which populates the file
    /// collection on first visit of the session.
    pub async fn navigate(&self, path: &str) -> Result<RouteDecision, StorageError> {
        let decision = self.guard.resolve(path).await;
        if decision == RouteDecision::Render(Route::Dashboard) {
            self.collection.initialize().await?;
        }
        Ok(decision)
    }

    // --- File collection reads and commands ---

    /// Sets the name filter applied by [`visible_files`](Self::visible_files)
    pub async fn set_filter(&self, text: &str) {
        *self.filter.write().await = text.to_string();
    }

    /// Returns the current name filter
    pub async fn filter(&self) -> String {
        self.filter.read().await.clone()
    }

    /// Returns the file records visible under the current filter
    pub async fn visible_files(&self) -> Vec<FileRecord> {
        let filter = self.filter.read().await.clone();
        self.collection.list(&filter).await
    }

    /// Subscribes to collection snapshots for re-rendering
    pub fn subscribe_files(&self) -> watch::Receiver<Vec<FileRecord>> {
        self.collection.subscribe()
    }

    /// Deletes a file remotely and removes it from the collection
    ///
    /// # Errors
    ///
    /// [`StorageError::NotFound`] if the service has no such id (surfaced
    /// as a notification; the collection is unchanged), or the transport
    /// failure if the service call failed.
    pub async fn delete_file(&self, id: &FileId) -> Result<(), StorageError> {
        self.storage.delete(id).await?;

        // The service deletion succeeded; a collection miss here means the
        // view was already ahead of us and is worth a log line, not an error
        if let Err(e) = self.collection.remove(id).await {
            warn!(error = %e, "Deleted file was not in the collection");
        } else {
            info!(id = %id, "File deleted");
        }
        Ok(())
    }

    /// Downloads a file's content by id
    pub async fn download_file(&self, id: &FileId) -> Result<Vec<u8>, StorageError> {
        self.storage.download(id).await
    }

    // --- Upload commands ---

    /// Starts a simulated upload of the selected file
    pub async fn start_upload(&self, request: UploadRequest) -> Result<(), UploadError> {
        self.uploader.start(request).await
    }

    /// Cancels the in-flight upload, if any
    pub async fn cancel_upload(&self) {
        self.uploader.cancel().await;
    }

    /// Returns the current upload progress
    pub fn upload_progress(&self) -> UploadProgress {
        self.uploader.progress()
    }

    /// Subscribes to the upload progress sequence
    pub fn subscribe_upload(&self) -> watch::Receiver<UploadProgress> {
        self.uploader.subscribe()
    }

    // --- Preferences ---

    /// Persists the theme preference
    pub async fn set_theme(&self, theme: ThemePreference) -> anyhow::Result<()> {
        self.local_store.set_theme(theme).await
    }

    /// Returns the persisted theme preference, defaulting to dark
    pub async fn theme(&self) -> ThemePreference {
        match self.local_store.theme().await {
            Ok(Some(theme)) => theme,
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read theme preference, using default");
                ThemePreference::default()
            }
        }
    }
}
