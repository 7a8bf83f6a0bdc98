//! Mixdrop host
//!
//! API notes: three bases: the REST API at `https://api.mixdrop.co`, the
//! upload endpoint at `https://ul.mixdrop.co/api`, and downloads at
//! `https://mixdrop.com/api`. Every call authenticates with `email` + `key`
//! parameters. Folders are true containers with stable ids (`folderlist`
//! browses into them); every response is wrapped in a
//! `{success, result}` envelope.

mod error;
mod host;
mod http;
mod types;

use reqwest::Client;

use crate::hosts::common::create_http_client;

pub(crate) use types::{
    MixdropCreatedFolder, MixdropEnvelope, MixdropErrorResult, MixdropFile, MixdropFolder,
    MixdropFolderList, MixdropUploadResult,
};

pub(crate) const MD_API_BASE: &str = "https://api.mixdrop.co";
pub(crate) const MD_UPLOAD_URL: &str = "https://ul.mixdrop.co/api";
pub(crate) const MD_DOWNLOAD_BASE: &str = "https://mixdrop.com/api";

/// Mixdrop host adapter.
pub struct MixdropHost {
    pub(crate) client: Client,
    pub(crate) email: String,
    pub(crate) api_key: String,
}

impl MixdropHost {
    pub fn new(email: String, api_key: String) -> Self {
        Self {
            client: create_http_client(),
            email,
            api_key,
        }
    }
}
