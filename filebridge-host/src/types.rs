use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HostError;

// ============ Host Types ============

/// Identifies which file-host implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
/// Parsing via [`FromStr`](std::str::FromStr) is case-insensitive;
/// [`Display`](std::fmt::Display) renders the canonical lower-case form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HostType {
    /// Pixeldrain. Requires feature `pixeldrain`.
    #[cfg(feature = "pixeldrain")]
    Pixeldrain,
    /// Mixdrop. Requires feature `mixdrop`.
    #[cfg(feature = "mixdrop")]
    Mixdrop,
}

impl std::fmt::Display for HostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "pixeldrain")]
            Self::Pixeldrain => write!(f, "pixeldrain"),
            #[cfg(feature = "mixdrop")]
            Self::Mixdrop => write!(f, "mixdrop"),
        }
    }
}

impl std::str::FromStr for HostType {
    type Err = ();

    /// Case-insensitive; host identifiers are stored lower-case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            #[cfg(feature = "pixeldrain")]
            "pixeldrain" => Ok(Self::Pixeldrain),
            #[cfg(feature = "mixdrop")]
            "mixdrop" => Ok(Self::Mixdrop),
            _ => Err(()),
        }
    }
}

/// Typed per-host credentials.
///
/// Each host combines its fields into its own authentication scheme:
/// Pixeldrain sends `Basic base64(":" + api_key)`, Mixdrop sends
/// `email` + `key` as query parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "host", rename_all = "lowercase")]
pub enum HostCredentials {
    /// Pixeldrain API key.
    #[cfg(feature = "pixeldrain")]
    Pixeldrain {
        /// Account API key.
        api_key: String,
    },
    /// Mixdrop account email + API key pair.
    #[cfg(feature = "mixdrop")]
    Mixdrop {
        /// Account email address.
        email: String,
        /// Account API key.
        api_key: String,
    },
}

impl HostCredentials {
    /// The host these credentials belong to.
    #[must_use]
    pub fn host_type(&self) -> HostType {
        match self {
            #[cfg(feature = "pixeldrain")]
            Self::Pixeldrain { .. } => HostType::Pixeldrain,
            #[cfg(feature = "mixdrop")]
            Self::Mixdrop { .. } => HostType::Mixdrop,
        }
    }
}

// ============ Remote Resources ============

/// A file as reported by a host. Never persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFile {
    /// Host-assigned opaque identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Upload timestamp.
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
    /// Download count, if the host reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
    /// View count, if the host reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    /// Owning folder; `None` = root.
    #[serde(rename = "folderId", skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// A folder as reported by a host. Never persisted locally.
///
/// Some hosts model folders as true containers, others as named file
/// lists created after upload; adapters translate both into this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFolder {
    /// Host-assigned opaque identifier.
    pub id: String,
    /// Folder title.
    pub title: String,
    /// Parent folder; `None` = root.
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Number of files inside, if the host reports one.
    #[serde(rename = "fileCount", skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u32>,
}

/// Contents of a host's root: top-level files and folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootListing {
    /// Files with no owning folder.
    pub files: Vec<RemoteFile>,
    /// Top-level folders.
    pub folders: Vec<RemoteFolder>,
}

/// Contents of a single folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderListing {
    /// Files inside the folder.
    pub files: Vec<RemoteFile>,
    /// Nested folders, for hosts that support nesting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folders: Option<Vec<RemoteFolder>>,
}

// ============ Upload / Download ============

/// An in-memory file to upload.
#[derive(Debug, Clone)]
pub struct FileBlob {
    /// File name, used as the display name on the host.
    pub name: String,
    /// Raw content.
    pub content: Vec<u8>,
    /// MIME type, if known.
    pub mime_type: Option<String>,
}

/// Result of uploading a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Host-assigned identifier of the new file.
    pub id: String,
    /// Name the file was stored under.
    pub name: String,
    /// Folder the file was associated with, if any.
    #[serde(rename = "folderId", skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// A downloaded file's bytes plus a suggested filename.
#[derive(Debug, Clone)]
pub struct FileDownload {
    /// Suggested filename (from `Content-Disposition` when available).
    pub file_name: String,
    /// Raw content.
    pub content: Vec<u8>,
    /// `Content-Type` reported by the host, if any.
    pub content_type: Option<String>,
}

// ============ Batch Outcomes ============

/// Per-item result inside a [`BatchOutcome`], keyed by the item's input
/// identifier (file id, file name, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem<T> {
    /// Input identifier this outcome belongs to.
    pub key: String,
    /// Success value, present iff the item succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    /// Normalized error, present iff the item failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<HostError>,
}

impl<T> BatchItem<T> {
    /// A successful item.
    pub fn ok(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
            error: None,
        }
    }

    /// A failed item.
    pub fn err(key: impl Into<String>, error: HostError) -> Self {
        Self {
            key: key.into(),
            value: None,
            error: Some(error),
        }
    }

    /// Whether this item succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.value.is_some()
    }
}

/// Outcome of a batch operation.
///
/// Always length-matched to the input batch: item `i` corresponds to
/// input `i`, regardless of how many items failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome<T> {
    /// Per-item outcomes, in input order.
    pub items: Vec<BatchItem<T>>,
    /// Number of successful items.
    #[serde(rename = "successCount")]
    pub success_count: usize,
    /// Number of failed items.
    #[serde(rename = "failedCount")]
    pub failed_count: usize,
}

impl<T> BatchOutcome<T> {
    /// Zip input keys with per-item results into an outcome.
    ///
    /// `keys` and `results` must have the same length.
    pub fn from_results(
        keys: impl IntoIterator<Item = String>,
        results: Vec<Result<T, HostError>>,
    ) -> Self {
        let items: Vec<BatchItem<T>> = keys
            .into_iter()
            .zip(results)
            .map(|(key, result)| match result {
                Ok(value) => BatchItem::ok(key, value),
                Err(error) => BatchItem::err(key, error),
            })
            .collect();
        let success_count = items.iter().filter(|i| i.is_success()).count();
        let failed_count = items.len() - success_count;
        Self {
            items,
            success_count,
            failed_count,
        }
    }

    /// Whether every item succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed_count == 0
    }
}

/// Outcome of a multi-file upload.
///
/// On hosts where folder association runs after the uploads, that step can
/// fail independently; the per-file outcomes are still reported (the files
/// exist on the host) with the association failure attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Per-file upload outcomes.
    #[serde(flatten)]
    pub files: BatchOutcome<UploadedFile>,
    /// Failure of the folder-association step, if any. Uploaded files
    /// carry no `folder_id` when this is set.
    #[serde(rename = "folderError", skip_serializing_if = "Option::is_none")]
    pub folder_error: Option<HostError>,
}

impl From<BatchOutcome<UploadedFile>> for UploadOutcome {
    fn from(files: BatchOutcome<UploadedFile>) -> Self {
        Self {
            files,
            folder_error: None,
        }
    }
}

// ============ Host Metadata ============

/// One credential field a host requires.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialField {
    /// Field name as stored in a credential record.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Whether the field must be non-empty.
    pub required: bool,
}

/// Describes a host and the credential fields it requires.
///
/// Useful for building dynamic credential forms that enumerate the
/// supported hosts.
#[derive(Debug, Clone, Serialize)]
pub struct HostMetadata {
    /// Host identifier.
    pub host: HostType,
    /// Human-readable host name.
    #[serde(rename = "displayName")]
    pub display_name: &'static str,
    /// Credential fields the host requires.
    pub fields: Vec<CredentialField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_type_parse_case_insensitive() {
        assert_eq!("pixeldrain".parse::<HostType>(), Ok(HostType::Pixeldrain));
        assert_eq!("Pixeldrain".parse::<HostType>(), Ok(HostType::Pixeldrain));
        assert_eq!("MIXDROP".parse::<HostType>(), Ok(HostType::Mixdrop));
    }

    #[test]
    fn host_type_parse_unknown() {
        assert!("gofile".parse::<HostType>().is_err());
        assert!("".parse::<HostType>().is_err());
    }

    #[test]
    fn host_type_display_lowercase() {
        assert_eq!(HostType::Pixeldrain.to_string(), "pixeldrain");
        assert_eq!(HostType::Mixdrop.to_string(), "mixdrop");
    }

    #[test]
    fn host_credentials_host_type() {
        let c = HostCredentials::Mixdrop {
            email: "a@b.c".to_string(),
            api_key: "k".to_string(),
        };
        assert_eq!(c.host_type(), HostType::Mixdrop);
    }

    #[test]
    fn host_credentials_serialize_tagged() {
        let c = HostCredentials::Pixeldrain {
            api_key: "k".to_string(),
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"host\":\"pixeldrain\""));
    }

    #[test]
    fn batch_outcome_preserves_order_and_counts() {
        let keys = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let results: Vec<Result<u32, HostError>> = vec![
            Ok(1),
            Err(HostError::Unknown {
                host: "test".to_string(),
                raw_code: None,
                raw_message: "boom".to_string(),
            }),
            Ok(3),
        ];
        let outcome = BatchOutcome::from_results(keys, results);
        assert_eq!(outcome.items.len(), 3);
        assert_eq!(outcome.success_count, 2);
        assert_eq!(outcome.failed_count, 1);
        assert!(!outcome.all_succeeded());
        assert_eq!(outcome.items[0].key, "a");
        assert!(outcome.items[0].is_success());
        assert_eq!(outcome.items[1].key, "b");
        assert!(!outcome.items[1].is_success());
        assert_eq!(outcome.items[2].value, Some(3));
    }

    #[test]
    fn batch_outcome_empty() {
        let outcome: BatchOutcome<()> = BatchOutcome::from_results(Vec::new(), Vec::new());
        assert!(outcome.items.is_empty());
        assert!(outcome.all_succeeded());
    }

    #[test]
    fn upload_outcome_flattens_batch_and_skips_absent_error() {
        let batch: BatchOutcome<UploadedFile> = BatchOutcome::from_results(
            vec!["a.bin".to_string()],
            vec![Ok(UploadedFile {
                id: "x1".to_string(),
                name: "a.bin".to_string(),
                folder_id: None,
            })],
        );
        let clean = UploadOutcome::from(batch.clone());
        let json = serde_json::to_string(&clean).unwrap();
        assert!(json.contains("\"successCount\":1"));
        assert!(!json.contains("folderError"));

        let failed = UploadOutcome {
            files: batch,
            folder_error: Some(HostError::Api {
                host: "test".to_string(),
                status: 500,
                message: "boom".to_string(),
            }),
        };
        let json = serde_json::to_string(&failed).unwrap();
        assert!(json.contains("\"folderError\""));
        assert!(json.contains("\"code\":\"Api\""));
    }

    #[test]
    fn batch_item_serialize_skips_absent_side() {
        let ok: BatchItem<u32> = BatchItem::ok("a", 1);
        let json = serde_json::to_string(&ok).unwrap();
        assert!(json.contains("\"value\":1"));
        assert!(!json.contains("error"));
    }
}
