//! Pixeldrain `HostAdapter` trait implementation.

use async_trait::async_trait;

use crate::batch::{run_batch, BatchOptions};
use crate::error::{HostError, Result};
use crate::hosts::common::filename_from_content_disposition;
use crate::traits::{ErrorContext, HostAdapter, HostErrorMapper};
use crate::types::{
    BatchOutcome, CredentialField, FileBlob, FileDownload, FolderListing, HostMetadata, HostType,
    RemoteFile, RemoteFolder, RootListing, UploadOutcome, UploadedFile,
};

use super::{
    CreateListRequest, IdResponse, ListDetailsResponse, ListFileRef, PixeldrainFile,
    PixeldrainHost, PixeldrainList, UserFilesResponse, UserListsResponse,
};

impl PixeldrainHost {
    /// Translate a Pixeldrain file entry into the uniform shape.
    pub(crate) fn file_to_remote(file: PixeldrainFile, folder_id: Option<&str>) -> RemoteFile {
        RemoteFile {
            id: file.id,
            name: file.name,
            size: file.size,
            uploaded_at: file.date_upload,
            downloads: file.downloads,
            views: file.views,
            folder_id: folder_id.map(ToString::to_string),
        }
    }

    /// Translate a Pixeldrain list into the uniform folder shape.
    /// Lists have no parent; they always live at the root.
    pub(crate) fn list_to_folder(list: PixeldrainList) -> RemoteFolder {
        RemoteFolder {
            id: list.id,
            title: list.title,
            parent_id: None,
            file_count: list.file_count,
        }
    }

    /// Create a list (Pixeldrain's folder construct) from file ids.
    async fn create_list(&self, title: &str, file_ids: Vec<String>) -> Result<String> {
        let body = CreateListRequest {
            title: title.to_string(),
            anonymous: false,
            files: file_ids.into_iter().map(|id| ListFileRef { id }).collect(),
        };
        let resp: IdResponse = self.post("/list", &body, ErrorContext::default()).await?;
        Ok(resp.id)
    }

    /// Fold the list-creation result into the upload outcome.
    ///
    /// On success every uploaded file gets the list id; on failure the
    /// uploads are kept (the files exist on the host) and the failure is
    /// carried alongside them.
    fn apply_list_result(
        mut outcome: BatchOutcome<UploadedFile>,
        list_result: Result<String>,
    ) -> UploadOutcome {
        match list_result {
            Ok(list_id) => {
                for item in &mut outcome.items {
                    if let Some(uploaded) = item.value.as_mut() {
                        uploaded.folder_id = Some(list_id.clone());
                    }
                }
                outcome.into()
            }
            Err(e) => UploadOutcome {
                files: outcome,
                folder_error: Some(e),
            },
        }
    }
}

#[async_trait]
impl HostAdapter for PixeldrainHost {
    fn id(&self) -> &'static str {
        "pixeldrain"
    }

    fn metadata() -> HostMetadata {
        HostMetadata {
            host: HostType::Pixeldrain,
            display_name: "Pixeldrain",
            fields: vec![CredentialField {
                name: "api_key",
                label: "API key",
                required: true,
            }],
        }
    }

    /// Root is two explicit endpoints: the account's files and its lists.
    async fn list_root(&self) -> Result<RootListing> {
        let files: UserFilesResponse = self.get("/user/files", ErrorContext::default()).await?;
        let lists: UserListsResponse = self.get("/user/lists", ErrorContext::default()).await?;
        Ok(RootListing {
            files: files
                .files
                .into_iter()
                .map(|f| Self::file_to_remote(f, None))
                .collect(),
            folders: lists.lists.into_iter().map(Self::list_to_folder).collect(),
        })
    }

    async fn list_folder(&self, folder_id: &str) -> Result<FolderListing> {
        let context = ErrorContext {
            folder_id: Some(folder_id.to_string()),
            ..ErrorContext::default()
        };
        let details: ListDetailsResponse = self
            .get(&format!("/list/{folder_id}"), context)
            .await?;
        Ok(FolderListing {
            files: details
                .files
                .into_iter()
                .map(|f| Self::file_to_remote(f, Some(folder_id)))
                .collect(),
            // Lists cannot nest.
            folders: None,
        })
    }

    /// Uploads run first; when a target folder is named, a list is created
    /// afterwards from the ids that actually uploaded. A failed upload never
    /// blocks its siblings or the list creation, and a failed list creation
    /// never hides the uploads that landed.
    async fn upload_files(
        &self,
        files: Vec<FileBlob>,
        target_folder: Option<&str>,
    ) -> Result<UploadOutcome> {
        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        let results = run_batch(
            files,
            |file| async move {
                let resp: IdResponse = self
                    .put_bytes(
                        &format!("/file/{}", urlencoding::encode(&file.name)),
                        file.content,
                        file.mime_type.as_deref(),
                    )
                    .await?;
                Ok(UploadedFile {
                    id: resp.id,
                    name: file.name,
                    folder_id: None,
                })
            },
            &BatchOptions::default(),
        )
        .await;
        let outcome = BatchOutcome::from_results(names, results);

        if let Some(title) = target_folder {
            let uploaded_ids: Vec<String> = outcome
                .items
                .iter()
                .filter_map(|item| item.value.as_ref().map(|v| v.id.clone()))
                .collect();
            if !uploaded_ids.is_empty() {
                let list_result = self.create_list(title, uploaded_ids).await;
                return Ok(Self::apply_list_result(outcome, list_result));
            }
        }

        Ok(outcome.into())
    }

    /// Lists are created empty here; Pixeldrain associates files with a
    /// list at creation time, so `upload_files` with a target folder is the
    /// usual way to populate one. Lists cannot nest; `parent_id` is ignored.
    async fn create_folder(&self, name: &str, _parent_id: Option<&str>) -> Result<String> {
        self.create_list(name, Vec::new()).await
    }

    async fn delete_file(&self, id: &str) -> Result<()> {
        let context = ErrorContext {
            file_id: Some(id.to_string()),
            ..ErrorContext::default()
        };
        self.delete(&format!("/file/{id}"), context).await
    }

    async fn delete_folder(&self, id: &str) -> Result<()> {
        let context = ErrorContext {
            folder_id: Some(id.to_string()),
            ..ErrorContext::default()
        };
        self.delete(&format!("/list/{id}"), context).await
    }

    async fn download_file(&self, id: &str) -> Result<FileDownload> {
        let (content, disposition, content_type) =
            self.download(&format!("/file/{id}?download")).await.map_err(|e| {
                // A missing file surfaces as a plain 404 on the download path.
                if let HostError::Api { status: 404, message, .. } = e {
                    HostError::FileNotFound {
                        host: self.host_name().to_string(),
                        file_id: id.to_string(),
                        raw_message: Some(message),
                    }
                } else {
                    e
                }
            })?;
        let file_name = disposition
            .as_deref()
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| id.to_string());
        Ok(FileDownload {
            file_name,
            content,
            content_type,
        })
    }
}
