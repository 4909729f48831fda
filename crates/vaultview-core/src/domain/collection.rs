//! FileCollection domain entity
//!
//! An ordered sequence of [`FileRecord`]s with unique ids. Insertion order
//! is display order: new records go to the front (most-recent-first).
//! Mutation invariants are enforced here so that no caller can introduce a
//! duplicate id or silently drop a record.

use serde::{Deserialize, Serialize};

use super::errors::CollectionError;
use super::file_record::FileRecord;
use super::newtypes::FileId;

/// The authoritative, ordered set of file records for a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCollection {
    records: Vec<FileRecord>,
}

impl FileCollection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection from pre-ordered records
    ///
    /// Later duplicates of an id are dropped; the first occurrence wins.
    /// Used when populating from the storage service listing, whose order
    /// is taken as the display order.
    pub fn from_records(records: impl IntoIterator<Item = FileRecord>) -> Self {
        let mut collection = Self::new();
        for record in records {
            // Listing responses should never repeat an id; drop if they do
            let _ = collection.push_back(record);
        }
        collection
    }

    /// Inserts a record at the front (most-recent-first ordering)
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateId`] without mutating the
    /// collection if a record with the same id is already present.
    pub fn insert_front(&mut self, record: FileRecord) -> Result<(), CollectionError> {
        if self.contains(record.id()) {
            return Err(CollectionError::DuplicateId(record.id().clone()));
        }
        self.records.insert(0, record);
        Ok(())
    }

    /// Appends a record at the back, preserving listing order
    pub fn push_back(&mut self, record: FileRecord) -> Result<(), CollectionError> {
        if self.contains(record.id()) {
            return Err(CollectionError::DuplicateId(record.id().clone()));
        }
        self.records.push(record);
        Ok(())
    }

    /// Removes the record with the given id
    ///
    /// Removes exactly one record and preserves the relative order of the
    /// rest.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if no record has that id.
    pub fn remove(&mut self, id: &FileId) -> Result<FileRecord, CollectionError> {
        let position = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| CollectionError::NotFound(id.clone()))?;
        Ok(self.records.remove(position))
    }

    /// Empties the collection
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns true if a record with the given id exists
    pub fn contains(&self, id: &FileId) -> bool {
        self.records.iter().any(|record| record.id() == id)
    }

    /// Returns the record with the given id, if present
    pub fn get(&self, id: &FileId) -> Option<&FileRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Returns the records whose names contain `needle`, ignoring case
    ///
    /// An empty needle returns the full collection unchanged in order.
    /// Pure: the returned records are clones, never aliases of the
    /// authoritative state.
    pub fn filter_by_name(&self, needle: &str) -> Vec<FileRecord> {
        self.records
            .iter()
            .filter(|record| record.name_contains(needle))
            .cloned()
            .collect()
    }

    /// Returns a snapshot of all records in display order
    pub fn records(&self) -> Vec<FileRecord> {
        self.records.clone()
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
