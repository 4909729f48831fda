//! Integration test entry point for the VaultView API adapters
//!
//! Tests run against a wiremock server standing in for the remote
//! authentication and file storage services.

mod common;
mod test_auth;
mod test_storage;
