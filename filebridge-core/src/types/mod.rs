//! Type definitions

mod account;
mod credential;

pub use account::Account;
pub use credential::{
    default_credentials, find_credential, remove_credential, upsert_credential, Credential,
};

// Re-export host library public types
pub use filebridge_host::{
    BatchItem, BatchOutcome, CredentialField, FileBlob, FileDownload, FolderListing,
    HostCredentials, HostMetadata, HostType, RemoteFile, RemoteFolder, RootListing, UploadOutcome,
    UploadedFile,
};
