//! File storage service HTTP adapter
//!
//! Implements the `IFileStorage` port against the remote storage REST API:
//!
//! - `GET /files` - list record metadata (JSON array)
//! - `PUT /files/{name}/content` - upload bytes, returns the created record
//! - `GET /files/{id}/content` - download bytes
//! - `DELETE /files/{id}` - delete by id
//!
//! Record JSON is camelCase with `type` as a free string; the DTO layer
//! maps it totally into the closed [`FileKind`] set (unknown labels become
//! `other`).
//!
//! ## Error mapping
//!
//! | Condition                      | Result                       |
//! |--------------------------------|------------------------------|
//! | 404 on id-addressed endpoints  | `StorageError::NotFound`     |
//! | Connect / timeout failures     | `StorageError::Unavailable`  |
//! | Other failures, bad payloads   | `StorageError::Transfer`     |

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vaultview_core::domain::{FileId, FileKind, FileRecord, StorageError};
use vaultview_core::ports::IFileStorage;

/// Default per-request timeout when none is configured
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Wire DTOs
// ============================================================================

/// A file record as the storage service serializes it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecordDto {
    pub id: String,
    pub name: String,
    /// Human-readable size label (the service pre-formats sizes)
    pub size: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub last_modified: NaiveDate,
    pub encrypted: bool,
}

impl FileRecordDto {
    /// Maps the wire record into the domain entity
    ///
    /// Unknown kind labels map to `FileKind::Other`; a record with an
    /// empty id is malformed and rejected.
    pub fn into_domain(self) -> Result<FileRecord, StorageError> {
        let id = FileId::new(self.id)
            .map_err(|e| StorageError::Transfer(format!("Malformed record: {}", e)))?;
        Ok(FileRecord::new(
            id,
            self.name,
            self.size,
            FileKind::from_label(&self.kind),
            self.last_modified,
            self.encrypted,
        ))
    }
}

// ============================================================================
// HttpFileStorage
// ============================================================================

/// HTTP client for the remote file storage service
pub struct HttpFileStorage {
    client: Client,
    base_url: String,
}

impl HttpFileStorage {
    /// Creates an adapter for the service at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Service root, without a trailing slash
    /// * `timeout` - Per-request timeout (None uses the default)
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Maps a transport-level failure into the storage taxonomy
    fn transport_error(e: reqwest::Error) -> StorageError {
        if e.is_connect() || e.is_timeout() {
            StorageError::Unavailable(e.to_string())
        } else {
            StorageError::Transfer(e.to_string())
        }
    }
}

#[async_trait::async_trait]
impl IFileStorage for HttpFileStorage {
    async fn list(&self) -> Result<Vec<FileRecord>, StorageError> {
        let response = self
            .client
            .get(self.url("/files"))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "File listing failed");
            return Err(StorageError::Unavailable(format!(
                "Listing returned status {}",
                response.status()
            )));
        }

        let dtos: Vec<FileRecordDto> = response
            .json()
            .await
            .map_err(|e| StorageError::Transfer(format!("Malformed listing: {}", e)))?;

        debug!(count = dtos.len(), "Fetched file listing");
        dtos.into_iter().map(FileRecordDto::into_domain).collect()
    }

    async fn upload(&self, name: &str, data: &[u8]) -> Result<FileRecord, StorageError> {
        let response = self
            .client
            .put(self.url(&format!("/files/{}/content", name)))
            .body(data.to_vec())
            .send()
            .await
            .map_err(Self::transport_error)?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let dto: FileRecordDto = response
                    .json()
                    .await
                    .map_err(|e| StorageError::Transfer(format!("Malformed record: {}", e)))?;
                debug!(name = %name, "Upload accepted");
                dto.into_domain()
            }
            status => {
                warn!(name = %name, status = %status, "Upload rejected");
                Err(StorageError::Transfer(format!(
                    "Upload returned status {}",
                    status
                )))
            }
        }
    }

    async fn download(&self, id: &FileId) -> Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get(self.url(&format!("/files/{}/content", id)))
            .send()
            .await
            .map_err(Self::transport_error)?;

        match response.status() {
            StatusCode::OK => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| StorageError::Transfer(e.to_string()))?;
                debug!(id = %id, bytes = bytes.len(), "Downloaded file content");
                Ok(bytes.to_vec())
            }
            StatusCode::NOT_FOUND => Err(StorageError::NotFound(id.clone())),
            status => Err(StorageError::Transfer(format!(
                "Download returned status {}",
                status
            ))),
        }
    }

    async fn delete(&self, id: &FileId) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(self.url(&format!("/files/{}", id)))
            .send()
            .await
            .map_err(Self::transport_error)?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => {
                debug!(id = %id, "File deleted");
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(StorageError::NotFound(id.clone())),
            status => Err(StorageError::Transfer(format!(
                "Delete returned status {}",
                status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_maps_unknown_kind_to_other() {
        let dto = FileRecordDto {
            id: "f-1".to_string(),
            name: "setup.exe".to_string(),
            size: "4.2 MB".to_string(),
            kind: "exe".to_string(),
            last_modified: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            encrypted: true,
        };
        let record = dto.into_domain().unwrap();
        assert_eq!(record.kind(), FileKind::Other);
    }

    #[test]
    fn test_dto_rejects_empty_id() {
        let dto = FileRecordDto {
            id: String::new(),
            name: "a.pdf".to_string(),
            size: "1.0 MB".to_string(),
            kind: "pdf".to_string(),
            last_modified: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            encrypted: true,
        };
        assert!(matches!(
            dto.into_domain(),
            Err(StorageError::Transfer(_))
        ));
    }

    #[test]
    fn test_dto_deserializes_camel_case() {
        let json = serde_json::json!({
            "id": "1",
            "name": "Project Report.pdf",
            "size": "2.4 MB",
            "type": "pdf",
            "lastModified": "2025-04-10",
            "encrypted": true
        });
        let dto: FileRecordDto = serde_json::from_value(json).unwrap();
        assert_eq!(dto.kind, "pdf");
        assert_eq!(
            dto.last_modified,
            NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
        );
    }
}
