//! Domain error types
//!
//! This module defines error types specific to domain operations:
//! authentication failures, collection invariant violations, storage
//! service failures, and newtype validation errors.

use thiserror::Error;

use super::newtypes::FileId;

/// Errors returned by authentication operations
///
/// `InvalidCredentials` is user-correctable and surfaced inline;
/// `ServiceUnavailable` is retryable. Neither changes session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The authentication service rejected the credentials
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The authentication service could not be reached or timed out
    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Errors raised by the file collection's invariant checks
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A record with this id is already present in the collection
    #[error("Duplicate file id: {0}")]
    DuplicateId(FileId),

    /// No record with this id exists in the collection
    #[error("File not found: {0}")]
    NotFound(FileId),
}

/// Errors returned by file storage operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The storage service has no file with this id
    #[error("File not found: {0}")]
    NotFound(FileId),

    /// The transfer itself failed (upload or download path)
    #[error("Transfer failed: {0}")]
    Transfer(String),

    /// The storage service could not be reached
    #[error("Storage service unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Returns true if the error means the service itself is unreachable
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_))
    }
}

/// Errors that can occur when constructing validated domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// File id was empty or malformed
    #[error("Invalid file id: {0}")]
    InvalidFileId(String),

    /// Username was empty after trimming
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Unknown theme preference string
    #[error("Invalid theme preference: {0}")]
    InvalidTheme(String),
}
