//! VaultView API - HTTP adapters for the remote collaborator services
//!
//! Implements the `IAuthService` and `IFileStorage` ports from
//! `vaultview-core` against the REST endpoints of the hosted services:
//!
//! - **Authentication Service**: credential verification returning an
//!   opaque token (`POST /auth/verify`).
//! - **File Storage Service**: metadata listing, binary upload/download,
//!   and deletion by id (`/files` endpoints). Encryption at rest happens
//!   server-side; this crate only transports bytes and metadata.
//!
//! Both adapters take their base URL at construction, which is also how
//! the integration tests point them at a wiremock server.

pub mod auth;
pub mod storage;

pub use auth::HttpAuthService;
pub use storage::HttpFileStorage;
