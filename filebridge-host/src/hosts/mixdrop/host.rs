//! Mixdrop `HostAdapter` trait implementation.

use async_trait::async_trait;

use crate::batch::{run_batch, BatchOptions};
use crate::error::{HostError, Result};
use crate::hosts::common::{epoch_millis_to_datetime, filename_from_content_disposition};
use crate::traits::{ErrorContext, HostAdapter, HostErrorMapper};
use crate::types::{
    BatchOutcome, CredentialField, FileBlob, FileDownload, FolderListing, HostMetadata, HostType,
    RemoteFile, RemoteFolder, RootListing, UploadOutcome, UploadedFile,
};

use super::{MixdropCreatedFolder, MixdropFile, MixdropFolder, MixdropFolderList, MixdropHost};

impl MixdropHost {
    /// Translate a Mixdrop file entry into the uniform shape.
    ///
    /// The `added` timestamp arrives as an epoch-milliseconds string; a
    /// value that does not parse is a malformed response, not a missing
    /// field.
    fn file_to_remote(&self, file: MixdropFile, folder_id: Option<&str>) -> Result<RemoteFile> {
        let millis: i64 = file
            .added
            .parse()
            .map_err(|_| self.parse_error(format!("invalid 'added' timestamp: {}", file.added)))?;
        Ok(RemoteFile {
            id: file.fileref,
            name: file.title,
            size: file.size,
            uploaded_at: epoch_millis_to_datetime(millis),
            downloads: None,
            views: None,
            folder_id: folder_id.map(ToString::to_string),
        })
    }

    fn folder_to_remote(folder: MixdropFolder) -> RemoteFolder {
        RemoteFolder {
            id: folder.id,
            title: folder.title,
            parent_id: folder.parent,
            file_count: None,
        }
    }

    async fn fetch_folder_list(&self, folder_id: Option<&str>) -> Result<MixdropFolderList> {
        let context = ErrorContext {
            folder_id: folder_id.map(ToString::to_string),
            ..ErrorContext::default()
        };
        match folder_id {
            Some(id) => self.get_api("/folderlist", &[("id", id)], context).await,
            None => self.get_api("/folderlist", &[], context).await,
        }
    }

    /// Resolve a folder title to its id, creating the folder when the root
    /// has no folder with that title. Mixdrop folders are real containers,
    /// so uploads need the id before they start.
    async fn resolve_folder(&self, title: &str) -> Result<String> {
        let root = self.fetch_folder_list(None).await?;
        if let Some(existing) = root.folders.into_iter().find(|f| f.title == title) {
            return Ok(existing.id);
        }
        self.create_folder(title, None).await
    }
}

#[async_trait]
impl HostAdapter for MixdropHost {
    fn id(&self) -> &'static str {
        "mixdrop"
    }

    fn metadata() -> HostMetadata {
        HostMetadata {
            host: HostType::Mixdrop,
            display_name: "Mixdrop",
            fields: vec![
                CredentialField {
                    name: "email",
                    label: "Account email",
                    required: true,
                },
                CredentialField {
                    name: "api_key",
                    label: "API key",
                    required: true,
                },
            ],
        }
    }

    async fn list_root(&self) -> Result<RootListing> {
        let listing = self.fetch_folder_list(None).await?;
        Ok(RootListing {
            files: listing
                .files
                .into_iter()
                .map(|f| self.file_to_remote(f, None))
                .collect::<Result<Vec<_>>>()?,
            folders: listing
                .folders
                .into_iter()
                .map(Self::folder_to_remote)
                .collect(),
        })
    }

    async fn list_folder(&self, folder_id: &str) -> Result<FolderListing> {
        let listing = self.fetch_folder_list(Some(folder_id)).await?;
        Ok(FolderListing {
            files: listing
                .files
                .into_iter()
                .map(|f| self.file_to_remote(f, Some(folder_id)))
                .collect::<Result<Vec<_>>>()?,
            // Folders nest, so subfolders are part of the listing.
            folders: Some(
                listing
                    .folders
                    .into_iter()
                    .map(Self::folder_to_remote)
                    .collect(),
            ),
        })
    }

    /// The target folder is resolved (or created) before any upload starts,
    /// so every file lands in it directly and a folder failure aborts
    /// before anything is sent. Per-file failures never abort sibling
    /// uploads.
    async fn upload_files(
        &self,
        files: Vec<FileBlob>,
        target_folder: Option<&str>,
    ) -> Result<UploadOutcome> {
        let folder_id = match target_folder {
            Some(title) => Some(self.resolve_folder(title).await?),
            None => None,
        };

        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        let results = run_batch(
            files,
            |file| {
                let folder_id = folder_id.clone();
                async move {
                    let name = file.name.clone();
                    let uploaded = self.upload_multipart(file, folder_id.as_deref()).await?;
                    Ok(UploadedFile {
                        id: uploaded.fileref,
                        name,
                        folder_id,
                    })
                }
            },
            &BatchOptions::default(),
        )
        .await;
        Ok(BatchOutcome::from_results(names, results).into())
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<String> {
        let mut params = vec![("title", name)];
        if let Some(parent) = parent_id {
            params.push(("parent", parent));
        }
        let created: MixdropCreatedFolder = self
            .get_api("/foldercreate", &params, ErrorContext::default())
            .await?;
        Ok(created.id)
    }

    async fn delete_file(&self, id: &str) -> Result<()> {
        let context = ErrorContext {
            file_id: Some(id.to_string()),
            ..ErrorContext::default()
        };
        self.delete_api("/fileinfo", &[("ref", id)], context).await
    }

    async fn delete_folder(&self, id: &str) -> Result<()> {
        let context = ErrorContext {
            folder_id: Some(id.to_string()),
            ..ErrorContext::default()
        };
        let _: serde_json::Value = self.get_api("/folderdel", &[("id", id)], context).await?;
        Ok(())
    }

    async fn download_file(&self, id: &str) -> Result<FileDownload> {
        let (content, disposition, content_type) = self.download(id).await.map_err(|e| {
            if let HostError::Api {
                status: 404,
                message,
                ..
            } = e
            {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> MixdropHost {
        MixdropHost::new("me@example.com".to_string(), "k".to_string())
    }

    fn sample_file() -> MixdropFile {
        MixdropFile {
            fileref: "ref-1".to_string(),
            title: "video.mp4".to_string(),
            added: "1700000000000".to_string(),
            size: 4096,
        }
    }

    #[test]
    fn file_conversion_parses_epoch_millis() {
        let remote = host().file_to_remote(sample_file(), Some("d-9")).unwrap();
        assert_eq!(remote.id, "ref-1");
        assert_eq!(remote.name, "video.mp4");
        assert_eq!(remote.size, 4096);
        assert_eq!(remote.uploaded_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(remote.folder_id.as_deref(), Some("d-9"));
        assert_eq!(remote.downloads, None);
    }

    #[test]
    fn file_conversion_rejects_bad_timestamp() {
        let mut file = sample_file();
        file.added = "yesterday".to_string();
        let err = host().file_to_remote(file, None).unwrap_err();
        assert!(matches!(err, HostError::ParseError { .. }));
    }

    #[test]
    fn folder_conversion_keeps_parent() {
        let folder = MixdropHost::folder_to_remote(MixdropFolder {
            id: "d-2".to_string(),
            title: "Clips".to_string(),
            parent: Some("d-1".to_string()),
        });
        assert_eq!(folder.id, "d-2");
        assert_eq!(folder.title, "Clips");
        assert_eq!(folder.parent_id.as_deref(), Some("d-1"));
        assert_eq!(folder.file_count, None);
    }

    #[test]
    fn folder_list_tolerates_missing_sections() {
        let listing: MixdropFolderList = serde_json::from_str(r#"{"folders": []}"#).unwrap();
        assert!(listing.folders.is_empty());
        assert!(listing.files.is_empty());
    }

    #[test]
    fn metadata_requires_email_and_key() {
        let meta = MixdropHost::metadata();
        assert_eq!(meta.host, HostType::Mixdrop);
        let names: Vec<&str> = meta.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["email", "api_key"]);
        assert!(meta.fields.iter().all(|f| f.required));
    }
}
