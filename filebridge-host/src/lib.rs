//! # filebridge-host
//!
//! A unified file-host abstraction library for managing files and folders
//! across multiple hosting services.
//!
//! ## Supported Hosts
//!
//! | Host | Feature Flag | Auth Method | Folder Model |
//! |------|-------------|-------------|--------------|
//! | [Pixeldrain](https://pixeldrain.com/) | `pixeldrain` | Basic (API key) | Lists, created after upload |
//! | [Mixdrop](https://mixdrop.co/) | `mixdrop` | Email + key query params | True containers |
//!
//! ## Feature Flags
//!
//! - **`all-hosts`** *(default)* — Enable all hosts listed above.
//! - **`pixeldrain`** — Enable only the Pixeldrain host.
//! - **`mixdrop`** — Enable only the Mixdrop host.
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! filebridge-host = { version = "0.1", features = ["all-hosts"] }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use filebridge_host::{create_adapter, FileBlob, HostCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create an adapter from credentials
//!     let credentials = HostCredentials::Pixeldrain {
//!         api_key: "your-key".to_string(),
//!     };
//!     let adapter = create_adapter(credentials);
//!
//!     // 2. List the account root
//!     let root = adapter.list_root().await?;
//!     for file in &root.files {
//!         println!("{} ({} bytes)", file.name, file.size);
//!     }
//!
//!     // 3. Upload into a folder, creating it when absent
//!     let outcome = adapter
//!         .upload_files(
//!             vec![FileBlob {
//!                 name: "notes.txt".to_string(),
//!                 content: b"hello".to_vec(),
//!                 mime_type: Some("text/plain".to_string()),
//!             }],
//!             Some("Trip"),
//!         )
//!         .await?;
//!     println!(
//!         "{} uploaded, {} failed",
//!         outcome.files.success_count, outcome.files.failed_count
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All host operations return [`Result<T, HostError>`](HostError). The error
//! enum provides structured variants for common failure modes:
//!
//! - [`HostError::InvalidCredentials`] — authentication failed
//! - [`HostError::FileNotFound`] / [`HostError::FolderNotFound`] — missing resource
//! - [`HostError::RateLimited`] — API rate limit exceeded
//! - [`HostError::NetworkError`] — network connectivity issue
//!
//! Adapters never retry; retry policy belongs to the caller. Batch
//! operations report per-item outcomes instead of failing as a whole.

mod batch;
mod error;
mod factory;
mod hosts;
mod http_client;
mod traits;
mod types;

// Re-export error types
pub use error::{HostError, Result};

// Re-export factory functions
pub use factory::{create_adapter, get_all_host_metadata};

// Re-export core trait only (internal traits are not exported)
pub use traits::HostAdapter;

// Re-export batch plumbing for callers that fan out their own operations
pub use batch::{run_batch, BatchOptions, DEFAULT_DOWNLOAD_STAGGER};

// Re-export types
pub use types::{
    BatchItem, BatchOutcome, CredentialField, FileBlob, FileDownload, FolderListing,
    HostCredentials, HostMetadata, HostType, RemoteFile, RemoteFolder, RootListing, UploadOutcome,
    UploadedFile,
};

// Re-export concrete hosts (behind feature flags)
#[cfg(feature = "pixeldrain")]
pub use hosts::PixeldrainHost;

#[cfg(feature = "mixdrop")]
pub use hosts::MixdropHost;
