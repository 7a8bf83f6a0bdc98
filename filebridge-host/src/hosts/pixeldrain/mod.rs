//! Pixeldrain host
//!
//! API notes: single REST surface at `https://pixeldrain.com/api`,
//! authenticated with `Authorization: Basic base64(":" + api_key)` (empty
//! username). Root is served by two distinct endpoints (`/user/files` and
//! `/user/lists`); "folders" are lists, named collections created after
//! the fact from already-uploaded file ids.

mod error;
mod host;
mod http;
mod types;

use reqwest::Client;

use crate::hosts::common::create_http_client;

pub(crate) use types::{
    CreateListRequest, IdResponse, ListDetailsResponse, ListFileRef, PixeldrainErrorBody,
    PixeldrainFile, PixeldrainList, UserFilesResponse, UserListsResponse,
};

pub(crate) const PD_API_BASE: &str = "https://pixeldrain.com/api";

/// Pixeldrain host adapter.
pub struct PixeldrainHost {
    pub(crate) client: Client,
    pub(crate) api_key: String,
}

impl PixeldrainHost {
    pub fn new(api_key: String) -> Self {
        Self {
            client: create_http_client(),
            api_key,
        }
    }
}
