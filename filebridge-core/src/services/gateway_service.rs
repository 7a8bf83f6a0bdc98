//! Uniform file-host call surface
//!
//! Every operation takes a host name and the request's identity evidence,
//! resolves a credential, builds the adapter and delegates. Input
//! validation happens before any network call.

use std::sync::Arc;

use filebridge_host::{create_adapter, HostAdapter};

use crate::error::{CoreError, CoreResult};
use crate::services::{IdentityService, RequestEvidence};
use crate::token::TokenCodec;
use crate::traits::AccountRepository;
use crate::types::{
    BatchOutcome, FileBlob, FileDownload, FolderListing, HostType, RootListing, UploadOutcome,
};

/// The gateway's uniform operation surface.
pub struct GatewayService {
    identity: IdentityService,
}

impl GatewayService {
    #[must_use]
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        token_codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            identity: IdentityService::new(account_repository, token_codec),
        }
    }

    /// Resolve evidence and build an adapter for one host.
    async fn adapter(
        &self,
        host: &str,
        evidence: &RequestEvidence,
    ) -> CoreResult<Arc<dyn HostAdapter>> {
        let host_type: HostType = host
            .parse()
            .map_err(|()| CoreError::UnsupportedHost(host.to_string()))?;
        let credential = self.identity.resolve(evidence, host_type).await?;
        Ok(create_adapter(credential.to_host_credentials()?))
    }

    fn log_outcome<T>(host: &str, op: &str, result: CoreResult<T>) -> CoreResult<T> {
        if let Err(e) = &result {
            if e.is_expected() {
                log::warn!("[{host}] {op} failed: {e}");
            } else {
                log::error!("[{host}] {op} failed: {e}");
            }
        }
        result
    }

    /// List a host's root files and folders.
    pub async fn list_root(
        &self,
        host: &str,
        evidence: &RequestEvidence,
    ) -> CoreResult<RootListing> {
        let result = async {
            let adapter = self.adapter(host, evidence).await?;
            Ok(adapter.list_root().await?)
        }
        .await;
        Self::log_outcome(host, "list_root", result)
    }

    /// List the contents of one folder.
    pub async fn list_folder(
        &self,
        host: &str,
        evidence: &RequestEvidence,
        folder_id: &str,
    ) -> CoreResult<FolderListing> {
        let result = async {
            if folder_id.trim().is_empty() {
                return Err(CoreError::ValidationError("no folder id".to_string()));
            }
            let adapter = self.adapter(host, evidence).await?;
            Ok(adapter.list_folder(folder_id).await?)
        }
        .await;
        Self::log_outcome(host, "list_folder", result)
    }

    /// Upload files, optionally into a named folder.
    pub async fn upload_files(
        &self,
        host: &str,
        evidence: &RequestEvidence,
        files: Vec<FileBlob>,
        target_folder: Option<&str>,
    ) -> CoreResult<UploadOutcome> {
        let result = async {
            if files.is_empty() {
                return Err(CoreError::ValidationError("no files selected".to_string()));
            }
            let adapter = self.adapter(host, evidence).await?;
            Ok(adapter.upload_files(files, target_folder).await?)
        }
        .await;
        Self::log_outcome(host, "upload_files", result)
    }

    /// Create a folder, returning its host-assigned ID.
    pub async fn create_folder(
        &self,
        host: &str,
        evidence: &RequestEvidence,
        name: &str,
        parent_id: Option<&str>,
    ) -> CoreResult<String> {
        let result = async {
            if name.trim().is_empty() {
                return Err(CoreError::ValidationError("no folder name".to_string()));
            }
            let adapter = self.adapter(host, evidence).await?;
            Ok(adapter.create_folder(name, parent_id).await?)
        }
        .await;
        Self::log_outcome(host, "create_folder", result)
    }

    /// Delete files, collecting per-item outcomes.
    pub async fn delete_files(
        &self,
        host: &str,
        evidence: &RequestEvidence,
        ids: &[String],
    ) -> CoreResult<BatchOutcome<()>> {
        let result = async {
            if ids.is_empty() {
                return Err(CoreError::ValidationError("no files selected".to_string()));
            }
            let adapter = self.adapter(host, evidence).await?;
            Ok(adapter.delete_files(ids).await?)
        }
        .await;
        Self::log_outcome(host, "delete_files", result)
    }

    /// Delete a folder.
    pub async fn delete_folder(
        &self,
        host: &str,
        evidence: &RequestEvidence,
        folder_id: &str,
    ) -> CoreResult<()> {
        let result = async {
            if folder_id.trim().is_empty() {
                return Err(CoreError::ValidationError("no folder id".to_string()));
            }
            let adapter = self.adapter(host, evidence).await?;
            Ok(adapter.delete_folder(folder_id).await?)
        }
        .await;
        Self::log_outcome(host, "delete_folder", result)
    }

    /// Download one file.
    pub async fn download_file(
        &self,
        host: &str,
        evidence: &RequestEvidence,
        file_id: &str,
    ) -> CoreResult<FileDownload> {
        let result = async {
            if file_id.trim().is_empty() {
                return Err(CoreError::ValidationError("no file id".to_string()));
            }
            let adapter = self.adapter(host, evidence).await?;
            Ok(adapter.download_file(file_id).await?)
        }
        .await;
        Self::log_outcome(host, "download_file", result)
    }

    /// Download several files, collecting per-item outcomes.
    pub async fn download_files(
        &self,
        host: &str,
        evidence: &RequestEvidence,
        ids: &[String],
    ) -> CoreResult<BatchOutcome<FileDownload>> {
        let result = async {
            if ids.is_empty() {
                return Err(CoreError::ValidationError("no files selected".to_string()));
            }
            let adapter = self.adapter(host, evidence).await?;
            Ok(adapter.download_files(ids).await?)
        }
        .await;
        Self::log_outcome(host, "download_files", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_gateway, test_account, test_codec, MockAccountRepository};
    use crate::types::Credential;

    fn cred(host: &str, key: &str) -> Credential {
        Credential {
            host: host.to_string(),
            api_key: key.to_string(),
            email: None,
        }
    }

    fn session(account_id: &str) -> RequestEvidence {
        RequestEvidence {
            session_account_id: Some(account_id.to_string()),
            anon_token: None,
        }
    }

    #[tokio::test]
    async fn unknown_host_is_rejected() {
        let (gateway, _repo) = create_test_gateway();
        let err = gateway
            .list_root("megaupload", &RequestEvidence::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedHost(h) if h == "megaupload"));
    }

    #[tokio::test]
    async fn no_identity_is_unauthenticated() {
        let (gateway, _repo) = create_test_gateway();
        let err = gateway
            .list_root("pixeldrain", &RequestEvidence::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Unauthenticated));
    }

    #[tokio::test]
    async fn empty_upload_set_is_rejected_before_identity() {
        let (gateway, _repo) = create_test_gateway();
        // Validation fires before credential resolution: evidence is absent
        // and the host is unknown, yet the validation error comes back.
        let err = gateway
            .upload_files("megaupload", &RequestEvidence::default(), Vec::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(msg) if msg == "no files selected"));
    }

    #[tokio::test]
    async fn empty_folder_name_is_rejected() {
        let (gateway, repo) = create_test_gateway();
        repo.save(&test_account("a1", vec![cred("pixeldrain", "k1")]))
            .await
            .unwrap();
        let err = gateway
            .create_folder("pixeldrain", &session("a1"), "   ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(msg) if msg == "no folder name"));
    }

    #[tokio::test]
    async fn empty_id_lists_are_rejected() {
        let (gateway, _repo) = create_test_gateway();
        let evidence = RequestEvidence::default();
        assert!(matches!(
            gateway.delete_files("pixeldrain", &evidence, &[]).await,
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            gateway.download_files("pixeldrain", &evidence, &[]).await,
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            gateway.delete_folder("pixeldrain", &evidence, "").await,
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            gateway.download_file("pixeldrain", &evidence, "  ").await,
            Err(CoreError::ValidationError(msg)) if msg == "no file id"
        ));
    }

    #[tokio::test]
    async fn missing_credential_is_reported_per_host() {
        let (gateway, repo) = create_test_gateway();
        repo.save(&test_account("a1", vec![cred("pixeldrain", "k1")]))
            .await
            .unwrap();
        let err = gateway
            .list_root("mixdrop", &session("a1"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::CredentialMissing(h) if h == "mixdrop"));
    }

    #[tokio::test]
    async fn mixdrop_without_email_fails_before_any_call() {
        let (gateway, repo) = create_test_gateway();
        repo.save(&test_account("a1", vec![cred("mixdrop", "k2")]))
            .await
            .unwrap();
        let err = gateway
            .list_root("mixdrop", &session("a1"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[tokio::test]
    async fn token_identity_flows_through_gateway() {
        let (gateway, _repo) = create_test_gateway();
        let token = test_codec().encode(vec![cred("mixdrop", "k2")]).unwrap();
        let evidence = RequestEvidence {
            session_account_id: None,
            anon_token: Some(token),
        };
        // Token decoded, list searched: the pixeldrain entry is what's
        // missing, not the identity.
        let err = gateway
            .list_root("pixeldrain", &evidence)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::CredentialMissing(h) if h == "pixeldrain"));
    }
}
