use async_trait::async_trait;

use crate::batch::{run_batch, BatchOptions, DEFAULT_DOWNLOAD_STAGGER};
use crate::error::{HostError, Result};
use crate::types::{
    BatchOutcome, FileBlob, FileDownload, FolderListing, HostMetadata, RootListing, UploadOutcome,
};

/// Raw API error (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code; format differs per host.
    pub code: Option<String>,
    /// Raw error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra context available when mapping an error (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// File ID, for `FileNotFound` and similar.
    pub file_id: Option<String>,
    /// Folder ID, for `FolderNotFound` and similar.
    pub folder_id: Option<String>,
}

/// Host error mapping trait (internal).
///
/// Each host implements this to translate its native error schema into the
/// unified [`HostError`] taxonomy; native shapes never leak past the adapter.
pub(crate) trait HostErrorMapper {
    /// Host identifier.
    fn host_name(&self) -> &'static str;

    /// Map a raw API error into the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> HostError;

    /// Shortcut: parse error.
    fn parse_error(&self, detail: impl ToString) -> HostError {
        HostError::ParseError {
            host: self.host_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback).
    fn unknown_error(&self, raw: RawApiError) -> HostError {
        HostError::Unknown {
            host: self.host_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Uniform file-host operations contract.
///
/// Each adapter implements these against one host's actual REST surface,
/// encapsulating that host's authentication scheme, field names and folder
/// semantics. Every method may suspend at each outbound call; failures
/// surface as normalized [`HostError`]s and are never retried here.
#[async_trait]
pub trait HostAdapter: Send + Sync {
    /// Host identifier.
    fn id(&self) -> &'static str;

    /// Host metadata (type level): display name and credential fields.
    ///
    /// Does not require an instance; callable before credentials exist.
    fn metadata() -> HostMetadata
    where
        Self: Sized;

    /// List the host's root: top-level files and folders.
    ///
    /// Adapters present identical root semantics whether the host exposes a
    /// distinct root endpoint or root is simply "everything with no parent".
    async fn list_root(&self) -> Result<RootListing>;

    /// List the contents of one folder.
    async fn list_folder(&self, folder_id: &str) -> Result<FolderListing>;

    /// Upload several files, optionally associating them with a named
    /// folder.
    ///
    /// When `target_folder` names a folder the host does not have, the
    /// adapter creates it and associates the successfully uploaded files
    /// with it. Per-file failures are reported in the outcome; they never
    /// abort sibling uploads. When the association step runs after the
    /// uploads and fails, the uploads are still reported, with the
    /// failure in [`UploadOutcome::folder_error`].
    async fn upload_files(
        &self,
        files: Vec<FileBlob>,
        target_folder: Option<&str>,
    ) -> Result<UploadOutcome>;

    /// Create a folder, returning its host-assigned ID.
    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<String>;

    /// Delete a single file.
    async fn delete_file(&self, id: &str) -> Result<()>;

    /// Delete several files, collecting per-item outcomes.
    ///
    /// The default implementation fans out [`delete_file`](Self::delete_file)
    /// concurrently; hosts with a native bulk-delete API may override it.
    async fn delete_files(&self, ids: &[String]) -> Result<BatchOutcome<()>> {
        let results = run_batch(
            ids.to_vec(),
            |id| async move { self.delete_file(&id).await },
            &BatchOptions::default(),
        )
        .await;
        Ok(BatchOutcome::from_results(ids.to_vec(), results))
    }

    /// Delete a folder.
    async fn delete_folder(&self, id: &str) -> Result<()>;

    /// Download a single file as bytes with a suggested filename.
    async fn download_file(&self, id: &str) -> Result<FileDownload>;

    /// Download several files, collecting per-item outcomes.
    ///
    /// The default implementation staggers dispatch (one extra
    /// [`DEFAULT_DOWNLOAD_STAGGER`] per item) so the host's rate limiting is
    /// not tripped by a burst; results are ordered to match `ids` even when
    /// a later download finishes first.
    async fn download_files(&self, ids: &[String]) -> Result<BatchOutcome<FileDownload>> {
        let results = run_batch(
            ids.to_vec(),
            |id| async move { self.download_file(&id).await },
            &BatchOptions::staggered(DEFAULT_DOWNLOAD_STAGGER),
        )
        .await;
        Ok(BatchOutcome::from_results(ids.to_vec(), results))
    }
}
