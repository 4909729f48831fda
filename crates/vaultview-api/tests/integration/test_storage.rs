//! Integration tests for the file storage service adapter

use vaultview_core::domain::{FileId, FileKind, StorageError};
use vaultview_core::ports::IFileStorage;

use crate::common::{
    mount_delete, mount_download, mount_listing, mount_upload, sample_listing,
    setup_storage_mock,
};

#[tokio::test]
async fn test_list_maps_records_in_order() {
    let (server, storage) = setup_storage_mock().await;
    mount_listing(&server, sample_listing()).await;

    let records = storage.list().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name(), "Project Report.pdf");
    assert_eq!(records[0].kind(), FileKind::Pdf);
    assert_eq!(records[1].size_label(), "1.8 MB");
    assert!(records.iter().all(|r| r.is_encrypted()));
}

#[tokio::test]
async fn test_list_unknown_kind_becomes_other() {
    let (server, storage) = setup_storage_mock().await;
    mount_listing(
        &server,
        serde_json::json!([{
            "id": "9",
            "name": "backup.tar",
            "size": "120.0 MB",
            "type": "tar",
            "lastModified": "2025-03-01",
            "encrypted": true
        }]),
    )
    .await;

    let records = storage.list().await.unwrap();
    assert_eq!(records[0].kind(), FileKind::Other);
}

#[tokio::test]
async fn test_list_server_error_is_unavailable() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let (server, storage) = setup_storage_mock().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = storage.list().await.unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_upload_returns_created_record() {
    let (server, storage) = setup_storage_mock().await;
    mount_upload(
        &server,
        "notes.docx",
        serde_json::json!({
            "id": "n-1",
            "name": "notes.docx",
            "size": "0.5 MB",
            "type": "docx",
            "lastModified": "2026-08-07",
            "encrypted": true
        }),
    )
    .await;

    let record = storage.upload("notes.docx", b"content").await.unwrap();
    assert_eq!(record.id().as_str(), "n-1");
    assert_eq!(record.kind(), FileKind::Docx);
    assert!(record.is_encrypted());
}

#[tokio::test]
async fn test_download_roundtrips_bytes() {
    let (server, storage) = setup_storage_mock().await;
    mount_download(&server, "1", b"encrypted-bytes").await;

    let bytes = storage
        .download(&FileId::new("1").unwrap())
        .await
        .unwrap();
    assert_eq!(bytes, b"encrypted-bytes");
}

#[tokio::test]
async fn test_download_missing_id_is_not_found() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let (server, storage) = setup_storage_mock().await;
    Mock::given(method("GET"))
        .and(path("/files/ghost/content"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let id = FileId::new("ghost").unwrap();
    let err = storage.download(&id).await.unwrap_err();
    assert_eq!(err, StorageError::NotFound(id));
}

#[tokio::test]
async fn test_delete_succeeds_on_no_content() {
    let (server, storage) = setup_storage_mock().await;
    mount_delete(&server, "1", 204).await;

    storage.delete(&FileId::new("1").unwrap()).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_id_is_not_found() {
    let (server, storage) = setup_storage_mock().await;
    mount_delete(&server, "ghost", 404).await;

    let id = FileId::new("ghost").unwrap();
    let err = storage.delete(&id).await.unwrap_err();
    assert_eq!(err, StorageError::NotFound(id));
}
