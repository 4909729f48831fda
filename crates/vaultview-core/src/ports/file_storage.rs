//! File storage service port (driven/secondary port)
//!
//! This module defines the interface to the remote File Storage Service:
//! metadata listing, binary upload and download, and deletion by id.
//! Encryption at rest is entirely owned by the service; records merely
//! report it through their `encrypted` flag.
//!
//! ## Design Notes
//!
//! - Returns the domain-level [`StorageError`] because callers branch on
//!   the taxonomy: `NotFound` surfaces as a non-fatal user notification,
//!   `Unavailable` triggers the collection's seed fallback, and `Transfer`
//!   aborts the operation without touching collection state.
//! - `upload` is the real transfer contract that the client-side upload
//!   simulator stands in for.

use crate::domain::{FileId, FileRecord, StorageError};

/// Port trait for remote file storage operations
#[async_trait::async_trait]
pub trait IFileStorage: Send + Sync {
    /// Lists all file records owned by the authenticated user
    ///
    /// The returned order is the service's display order (most recent
    /// first) and is preserved by the collection.
    async fn list(&self) -> Result<Vec<FileRecord>, StorageError>;

    /// Uploads file content and returns the created record
    ///
    /// # Arguments
    /// * `name` - The file name, including extension
    /// * `data` - The file contents
    async fn upload(&self, name: &str, data: &[u8]) -> Result<FileRecord, StorageError>;

    /// Downloads a file's content by id
    async fn download(&self, id: &FileId) -> Result<Vec<u8>, StorageError>;

    /// Deletes a file by id
    async fn delete(&self, id: &FileId) -> Result<(), StorageError>;
}
