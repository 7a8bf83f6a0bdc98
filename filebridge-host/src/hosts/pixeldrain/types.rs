//! Pixeldrain wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file entry as returned by `/user/files` and `/list/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PixeldrainFile {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub date_upload: DateTime<Utc>,
    #[serde(default)]
    pub downloads: Option<u64>,
    #[serde(default)]
    pub views: Option<u64>,
}

/// A list entry as returned by `/user/lists`. Lists are Pixeldrain's
/// folder-like construct.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PixeldrainList {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub file_count: Option<u32>,
}

/// Response of `GET /user/files`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserFilesResponse {
    pub files: Vec<PixeldrainFile>,
}

/// Response of `GET /user/lists`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserListsResponse {
    pub lists: Vec<PixeldrainList>,
}

/// Response of `GET /list/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListDetailsResponse {
    pub files: Vec<PixeldrainFile>,
}

/// Response of `PUT /file/{name}` and `POST /list`.
#[derive(Debug, Deserialize)]
pub(crate) struct IdResponse {
    pub id: String,
}

/// One file reference inside a list creation request.
#[derive(Debug, Serialize)]
pub(crate) struct ListFileRef {
    pub id: String,
}

/// Body of `POST /list`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateListRequest {
    pub title: String,
    pub anonymous: bool,
    pub files: Vec<ListFileRef>,
}

/// Error body Pixeldrain returns on failure:
/// `{"success": false, "value": "<code>", "message": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct PixeldrainErrorBody {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
