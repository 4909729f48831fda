//! Domain entities and business logic
//!
//! This module contains the core domain types for VaultView:
//! - Newtypes for type-safe identifiers and validated domain values
//! - Session and identity types
//! - File records, the file-kind variant set, and the ordered collection
//! - Theme preference
//! - Domain-specific error types

pub mod collection;
pub mod errors;
pub mod file_record;
pub mod newtypes;
pub mod session;
pub mod theme;

// Re-export commonly used types
pub use collection::FileCollection;
pub use errors::{AuthError, CollectionError, DomainError, StorageError};
pub use file_record::{format_size_label, FileKind, FileRecord};
pub use newtypes::{AuthToken, FileId, Username};
pub use session::{Identity, Session};
pub use theme::ThemePreference;
