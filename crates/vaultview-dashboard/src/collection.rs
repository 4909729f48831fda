//! File collection manager - authoritative owner of the session's files
//!
//! Holds the one mutable [`FileCollection`] for the authenticated session
//! and publishes an immutable snapshot through a watch channel after every
//! mutation. Views subscribe to the channel and re-render from snapshots;
//! nothing outside this module touches the authoritative state.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{watch, RwLock};
use tracing::{error, info, warn};

use vaultview_core::domain::{
    CollectionError, FileCollection, FileId, FileKind, FileRecord, StorageError,
};
use vaultview_core::ports::IFileStorage;

/// Demo records shown when the storage service is unreachable
///
/// Mirrors the seed set the hosted service provisions for new accounts, so
/// an offline session still has a populated dashboard to work against.
fn seed_records() -> Vec<FileRecord> {
    fn seed(id: &str, name: &str, size: &str, kind: FileKind, date: (i32, u32, u32)) -> FileRecord {
        FileRecord::new(
            FileId::new(id).expect("seed ids are non-empty"),
            name,
            size,
            kind,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("seed dates are valid"),
            true,
        )
    }

    vec![
        seed("1", "Project Report.pdf", "2.4 MB", FileKind::Pdf, (2025, 4, 10)),
        seed("2", "Financial Data.xlsx", "1.8 MB", FileKind::Xlsx, (2025, 4, 8)),
        seed("3", "Meeting Notes.docx", "0.5 MB", FileKind::Docx, (2025, 4, 12)),
        seed("4", "Profile Picture.jpg", "3.2 MB", FileKind::Jpg, (2025, 4, 1)),
        seed("5", "Source Code.zip", "15.7 MB", FileKind::Zip, (2025, 4, 14)),
    ]
}

struct CollectionState {
    collection: FileCollection,
    initialized: bool,
}

/// Owns the in-memory file collection and drives its lifecycle
pub struct FileCollectionManager {
    storage: Arc<dyn IFileStorage>,
    state: RwLock<CollectionState>,
    snapshot_tx: watch::Sender<Vec<FileRecord>>,
}

impl FileCollectionManager {
    /// Creates an empty, uninitialized manager
    pub fn new(storage: Arc<dyn IFileStorage>) -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        Self {
            storage,
            state: RwLock::new(CollectionState {
                collection: FileCollection::new(),
                initialized: false,
            }),
            snapshot_tx,
        }
    }

    /// Populates the collection from the storage service, once per session
    ///
    /// Repeated calls within the same session are no-ops and never
    /// duplicate entries. If the service is unreachable the fixed seed set
    /// is used instead; other listing failures propagate to the caller and
    /// leave the manager uninitialized so a retry can succeed.
    pub async fn initialize(&self) -> Result<(), StorageError> {
        {
            let state = self.state.read().await;
            if state.initialized {
                return Ok(());
            }
        }

        let records = match self.storage.list().await {
            Ok(records) => records,
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "Storage service unreachable, using seed records");
                seed_records()
            }
            Err(e) => return Err(e),
        };

        let mut state = self.state.write().await;
        // A concurrent initialize may have won the race while we listed
        if state.initialized {
            return Ok(());
        }
        state.collection = FileCollection::from_records(records);
        state.initialized = true;
        info!(count = state.collection.len(), "File collection initialized");

        self.publish(&state.collection);
        Ok(())
    }

    /// Returns the records whose names contain `filter`, ignoring case
    ///
    /// An empty filter returns the full collection in display order.
    /// Pure: never mutates manager state.
    pub async fn list(&self, filter: &str) -> Vec<FileRecord> {
        self.state.read().await.collection.filter_by_name(filter)
    }

    /// Inserts a record at the head of the collection
    ///
    /// A duplicate id is an internal invariant violation: it is logged,
    /// the operation rejected, and the existing collection left intact.
    pub async fn add(&self, record: FileRecord) -> Result<(), CollectionError> {
        let mut state = self.state.write().await;
        match state.collection.insert_front(record) {
            Ok(()) => {
                self.publish(&state.collection);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Rejected add that would corrupt the collection");
                Err(e)
            }
        }
    }

    /// Removes the record with the given id
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotFound`] if no record has that id; the
    /// collection is unchanged.
    pub async fn remove(&self, id: &FileId) -> Result<FileRecord, CollectionError> {
        let mut state = self.state.write().await;
        let removed = state.collection.remove(id)?;
        self.publish(&state.collection);
        Ok(removed)
    }

    /// Empties the collection and re-arms initialization
    ///
    /// Called on logout; the next session initializes afresh.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.collection.clear();
        state.initialized = false;
        self.publish(&state.collection);
    }

    /// Returns a snapshot of all records in display order
    pub async fn records(&self) -> Vec<FileRecord> {
        self.state.read().await.collection.records()
    }

    /// Subscribes to collection snapshots
    ///
    /// The receiver observes a fresh immutable snapshot after every
    /// mutation. Mutating a received snapshot has no effect on the
    /// authoritative collection.
    pub fn subscribe(&self) -> watch::Receiver<Vec<FileRecord>> {
        self.snapshot_tx.subscribe()
    }

    fn publish(&self, collection: &FileCollection) {
        // send_replace never fails, even with no subscribers
        self.snapshot_tx.send_replace(collection.records());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryFileStorage;

    fn record(id: &str, name: &str) -> FileRecord {
        FileRecord::new(
            FileId::new(id).unwrap(),
            name,
            "1.0 MB",
            FileKind::from_name(name),
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            true,
        )
    }

    #[tokio::test]
    async fn test_initialize_populates_from_storage() {
        let storage = Arc::new(InMemoryFileStorage::new());
        storage.seed(vec![record("a", "one.pdf"), record("b", "two.zip")]);

        let manager = FileCollectionManager::new(storage);
        manager.initialize().await.unwrap();

        let records = manager.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "one.pdf");
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent_within_session() {
        let storage = Arc::new(InMemoryFileStorage::new());
        storage.seed(vec![record("a", "one.pdf")]);

        let manager = FileCollectionManager::new(storage);
        manager.initialize().await.unwrap();
        manager.initialize().await.unwrap();

        assert_eq!(manager.records().await.len(), 1);
    }

    #[tokio::test]
    async fn test_initialize_falls_back_to_seed_when_unreachable() {
        let storage = Arc::new(InMemoryFileStorage::new());
        storage.set_available(false);

        let manager = FileCollectionManager::new(storage);
        manager.initialize().await.unwrap();

        let records = manager.records().await;
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].name(), "Project Report.pdf");
        assert!(records.iter().all(|r| r.is_encrypted()));
    }

    #[tokio::test]
    async fn test_clear_rearms_initialization() {
        let storage = Arc::new(InMemoryFileStorage::new());
        storage.seed(vec![record("a", "one.pdf")]);

        let manager = FileCollectionManager::new(storage.clone());
        manager.initialize().await.unwrap();
        manager.clear().await;
        assert!(manager.records().await.is_empty());

        storage.seed(vec![record("a", "one.pdf"), record("b", "two.zip")]);
        manager.initialize().await.unwrap();
        assert_eq!(manager.records().await.len(), 2);
    }

    #[tokio::test]
    async fn test_add_duplicate_is_rejected_without_corruption() {
        let storage = Arc::new(InMemoryFileStorage::new());
        let manager = FileCollectionManager::new(storage);
        manager.initialize().await.unwrap();

        manager.add(record("x", "a.pdf")).await.unwrap();
        let err = manager.add(record("x", "imposter.pdf")).await.unwrap_err();
        assert!(matches!(err, CollectionError::DuplicateId(_)));

        let records = manager.records().await;
        let count = records.iter().filter(|r| r.id().as_str() == "x").count();
        assert_eq!(count, 1);
        assert_eq!(records[0].name(), "a.pdf");
    }

    #[tokio::test]
    async fn test_list_filters_case_insensitively() {
        let storage = Arc::new(InMemoryFileStorage::new());
        storage.seed(vec![
            record("1", "Project Report.pdf"),
            record("2", "holiday.png"),
        ]);

        let manager = FileCollectionManager::new(storage);
        manager.initialize().await.unwrap();

        assert_eq!(manager.list("REPORT").await.len(), 1);
        assert_eq!(manager.list("").await.len(), 2);
        assert!(manager.list("missing").await.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_observe_mutations_as_snapshots() {
        let storage = Arc::new(InMemoryFileStorage::new());
        let manager = FileCollectionManager::new(storage);
        manager.initialize().await.unwrap();

        let mut rx = manager.subscribe();
        manager.add(record("x", "a.pdf")).await.unwrap();

        rx.changed().await.unwrap();
        let mut snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.len(), 1);

        // Mutating the snapshot must not affect authoritative state
        snapshot.clear();
        assert_eq!(manager.records().await.len(), 1);

        manager.remove(&FileId::new("x").unwrap()).await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_id_is_not_found() {
        let storage = Arc::new(InMemoryFileStorage::new());
        let manager = FileCollectionManager::new(storage);
        manager.initialize().await.unwrap();

        let id = FileId::new("ghost").unwrap();
        let err = manager.remove(&id).await.unwrap_err();
        assert_eq!(err, CollectionError::NotFound(id));
    }
}
