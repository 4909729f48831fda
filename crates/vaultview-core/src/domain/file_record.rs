//! FileRecord domain entity
//!
//! This module defines the FileRecord entity describing one file owned by
//! the user, together with the closed set of file-kind variants used for
//! display dispatch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::newtypes::FileId;

// ============================================================================
// FileKind
// ============================================================================

/// Closed set of recognized file kinds
///
/// Classification is total: any name whose extension is not recognized maps
/// to [`FileKind::Other`] rather than falling through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Xlsx,
    Docx,
    Jpg,
    Png,
    Zip,
    #[default]
    Other,
}

impl FileKind {
    /// Classifies a file by the extension of its name (case-insensitive)
    pub fn from_name(name: &str) -> Self {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => FileKind::Pdf,
            "xlsx" => FileKind::Xlsx,
            "docx" => FileKind::Docx,
            "jpg" | "jpeg" => FileKind::Jpg,
            "png" => FileKind::Png,
            "zip" => FileKind::Zip,
            _ => FileKind::Other,
        }
    }

    /// Parses a wire-format kind label, mapping unknown labels to `Other`
    ///
    /// The storage service sends the kind as a free string; this keeps the
    /// mapping total on the receiving side as well.
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "pdf" => FileKind::Pdf,
            "xlsx" => FileKind::Xlsx,
            "docx" => FileKind::Docx,
            "jpg" | "jpeg" => FileKind::Jpg,
            "png" => FileKind::Png,
            "zip" => FileKind::Zip,
            _ => FileKind::Other,
        }
    }

    /// Returns the lowercase label used on the wire and in display
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Xlsx => "xlsx",
            FileKind::Docx => "docx",
            FileKind::Jpg => "jpg",
            FileKind::Png => "png",
            FileKind::Zip => "zip",
            FileKind::Other => "other",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// FileRecord
// ============================================================================

/// Metadata describing one file owned by the user
///
/// Records come from the storage service listing or are synthesized when a
/// simulated upload completes. The `encrypted` flag is metadata owned by the
/// storage service; this client performs no cryptographic work itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique identifier within the collection
    id: FileId,
    /// Display name, including extension
    name: String,
    /// Human-readable size label (e.g. "2.4 MB")
    size_label: String,
    /// Classified file kind
    kind: FileKind,
    /// Date of last modification
    last_modified: NaiveDate,
    /// Whether the stored content is encrypted at rest
    encrypted: bool,
}

impl FileRecord {
    /// Creates a record with every field specified
    pub fn new(
        id: FileId,
        name: impl Into<String>,
        size_label: impl Into<String>,
        kind: FileKind,
        last_modified: NaiveDate,
        encrypted: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            size_label: size_label.into(),
            kind,
            last_modified,
            encrypted,
        }
    }

    /// Creates a record for a file uploaded through this client
    ///
    /// The kind is classified from the name, the size label is formatted
    /// from the byte count, and the encrypted flag is always set: the
    /// storage service contract encrypts everything it accepts.
    pub fn uploaded(
        name: impl Into<String>,
        size_bytes: u64,
        last_modified: NaiveDate,
    ) -> Self {
        let name = name.into();
        let kind = FileKind::from_name(&name);
        Self {
            id: FileId::generate(),
            name,
            size_label: format_size_label(size_bytes),
            kind,
            last_modified,
            encrypted: true,
        }
    }

    // --- Getters ---

    /// Returns the record's unique identifier
    pub fn id(&self) -> &FileId {
        &self.id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable size label
    pub fn size_label(&self) -> &str {
        &self.size_label
    }

    /// Returns the classified file kind
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Returns the last-modified date
    pub fn last_modified(&self) -> NaiveDate {
        self.last_modified
    }

    /// Returns true if the stored content is encrypted at rest
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Returns true if `needle` occurs in the name, ignoring case
    ///
    /// An empty needle matches every record.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

/// Formats a byte count as a human-readable size label
///
/// Matches the labels the storage service produces: one decimal place,
/// binary-free 1000-based units ("0.5 MB", "15.7 MB", "3.1 GB").
pub fn format_size_label(bytes: u64) -> String {
    const KB: f64 = 1_000.0;
    const MB: f64 = 1_000_000.0;
    const GB: f64 = 1_000_000_000.0;

    let bytes = bytes as f64;
    if bytes >= GB {
        format!("{:.1} GB", bytes / GB)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{} B", bytes as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod file_kind_tests {
        use super::*;

        #[test]
        fn test_from_name_recognized_extensions() {
            assert_eq!(FileKind::from_name("Report.pdf"), FileKind::Pdf);
            assert_eq!(FileKind::from_name("data.XLSX"), FileKind::Xlsx);
            assert_eq!(FileKind::from_name("notes.docx"), FileKind::Docx);
            assert_eq!(FileKind::from_name("photo.jpeg"), FileKind::Jpg);
            assert_eq!(FileKind::from_name("icon.png"), FileKind::Png);
            assert_eq!(FileKind::from_name("src.zip"), FileKind::Zip);
        }

        #[test]
        fn test_from_name_unrecognized_maps_to_other() {
            assert_eq!(FileKind::from_name("archive.tar.gz"), FileKind::Other);
            assert_eq!(FileKind::from_name("README"), FileKind::Other);
            assert_eq!(FileKind::from_name("noext."), FileKind::Other);
        }

        #[test]
        fn test_from_label_total() {
            assert_eq!(FileKind::from_label("pdf"), FileKind::Pdf);
            assert_eq!(FileKind::from_label("PDF"), FileKind::Pdf);
            assert_eq!(FileKind::from_label("exe"), FileKind::Other);
            assert_eq!(FileKind::from_label(""), FileKind::Other);
        }

        #[test]
        fn test_serde_lowercase() {
            let json = serde_json::to_string(&FileKind::Xlsx).unwrap();
            assert_eq!(json, "\"xlsx\"");
            let kind: FileKind = serde_json::from_str("\"zip\"").unwrap();
            assert_eq!(kind, FileKind::Zip);
        }
    }

    mod file_record_tests {
        use super::*;

        #[test]
        fn test_uploaded_record_is_always_encrypted() {
            let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
            let record = FileRecord::uploaded("Quarterly.pdf", 2_400_000, date);

            assert!(record.is_encrypted());
            assert_eq!(record.kind(), FileKind::Pdf);
            assert_eq!(record.size_label(), "2.4 MB");
            assert_eq!(record.last_modified(), date);
        }

        #[test]
        fn test_uploaded_records_have_unique_ids() {
            let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
            let a = FileRecord::uploaded("a.pdf", 100, date);
            let b = FileRecord::uploaded("a.pdf", 100, date);
            assert_ne!(a.id(), b.id());
        }

        #[test]
        fn test_name_contains_is_case_insensitive() {
            let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
            let record = FileRecord::uploaded("Project Report.pdf", 100, date);

            assert!(record.name_contains("report"));
            assert!(record.name_contains("REPORT"));
            assert!(record.name_contains(""));
            assert!(!record.name_contains("invoice"));
        }

        #[test]
        fn test_last_modified_serializes_as_date_string() {
            let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
            let record = FileRecord::new(
                FileId::new("1").unwrap(),
                "Project Report.pdf",
                "2.4 MB",
                FileKind::Pdf,
                date,
                true,
            );
            let json = serde_json::to_value(&record).unwrap();
            assert_eq!(json["last_modified"], "2025-04-10");
        }
    }

    mod size_label_tests {
        use super::*;

        #[test]
        fn test_format_size_label() {
            assert_eq!(format_size_label(0), "0 B");
            assert_eq!(format_size_label(512), "512 B");
            assert_eq!(format_size_label(1_500), "1.5 KB");
            assert_eq!(format_size_label(2_400_000), "2.4 MB");
            assert_eq!(format_size_label(15_700_000), "15.7 MB");
            assert_eq!(format_size_label(3_100_000_000), "3.1 GB");
        }
    }
}
