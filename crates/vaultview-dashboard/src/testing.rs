//! In-memory port fakes shared by the crate's tests
//!
//! Each fake honors the corresponding port contract closely enough to
//! exercise the state machine layer without a network or database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use vaultview_core::domain::{
    AuthError, AuthToken, FileId, FileRecord, StorageError, ThemePreference, Username,
};
use vaultview_core::ports::{IAuthService, IFileStorage, ILocalStore};

/// Accepts exactly one username/password pair
pub struct FixedAuthService {
    username: String,
    password: String,
}

impl FixedAuthService {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl IAuthService for FixedAuthService {
    async fn verify(&self, username: &Username, password: &str) -> Result<AuthToken, AuthError> {
        if username.as_str() == self.username && password == self.password {
            Ok(AuthToken::new(format!("tok-{}", self.username)))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Answers only after a delay, for exercising call-site timeouts
pub struct SlowAuthService {
    delay: Duration,
}

impl SlowAuthService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl IAuthService for SlowAuthService {
    async fn verify(&self, _username: &Username, _password: &str) -> Result<AuthToken, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(AuthToken::new("tok-slow"))
    }
}

/// Durable client storage held in process memory
#[derive(Default)]
pub struct InMemoryLocalStore {
    marker: Mutex<Option<AuthToken>>,
    theme: Mutex<Option<ThemePreference>>,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read of the marker for assertions
    pub fn marker(&self) -> Option<AuthToken> {
        self.marker.lock().unwrap().clone()
    }

    /// Pre-populates the marker, as if a prior session had logged in
    pub fn seed_marker(&self, token: &str) {
        *self.marker.lock().unwrap() = Some(AuthToken::new(token));
    }
}

#[async_trait::async_trait]
impl ILocalStore for InMemoryLocalStore {
    async fn store_session_marker(&self, token: &AuthToken) -> anyhow::Result<()> {
        *self.marker.lock().unwrap() = Some(token.clone());
        Ok(())
    }

    async fn load_session_marker(&self) -> anyhow::Result<Option<AuthToken>> {
        Ok(self.marker.lock().unwrap().clone())
    }

    async fn clear_session_marker(&self) -> anyhow::Result<()> {
        *self.marker.lock().unwrap() = None;
        Ok(())
    }

    async fn set_theme(&self, theme: ThemePreference) -> anyhow::Result<()> {
        *self.theme.lock().unwrap() = Some(theme);
        Ok(())
    }

    async fn theme(&self) -> anyhow::Result<Option<ThemePreference>> {
        Ok(*self.theme.lock().unwrap())
    }
}

/// File storage service held in process memory
///
/// Can be flipped unavailable to exercise the seed fallback and outage
/// handling.
#[derive(Default)]
pub struct InMemoryFileStorage {
    records: Mutex<Vec<FileRecord>>,
    content: Mutex<HashMap<String, Vec<u8>>>,
    available: AtomicBool,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        let storage = Self::default();
        storage.available.store(true, Ordering::Release);
        storage
    }

    /// Replaces the stored listing
    pub fn seed(&self, records: Vec<FileRecord>) {
        *self.records.lock().unwrap() = records;
    }

    /// Stores downloadable content for an id
    pub fn seed_content(&self, id: &str, bytes: &[u8]) {
        self.content
            .lock()
            .unwrap()
            .insert(id.to_string(), bytes.to_vec());
    }

    /// Simulates the service going down or coming back
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StorageError::Unavailable("service offline".to_string()))
        }
    }
}

#[async_trait::async_trait]
impl IFileStorage for InMemoryFileStorage {
    async fn list(&self) -> Result<Vec<FileRecord>, StorageError> {
        self.check_available()?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn upload(&self, name: &str, data: &[u8]) -> Result<FileRecord, StorageError> {
        self.check_available()?;
        let record =
            FileRecord::uploaded(name, data.len() as u64, chrono::Utc::now().date_naive());
        self.content
            .lock()
            .unwrap()
            .insert(record.id().as_str().to_string(), data.to_vec());
        self.records.lock().unwrap().insert(0, record.clone());
        Ok(record)
    }

    async fn download(&self, id: &FileId) -> Result<Vec<u8>, StorageError> {
        self.check_available()?;
        self.content
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.clone()))
    }

    async fn delete(&self, id: &FileId) -> Result<(), StorageError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();
        let position = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| StorageError::NotFound(id.clone()))?;
        records.remove(position);
        self.content.lock().unwrap().remove(id.as_str());
        Ok(())
    }
}
