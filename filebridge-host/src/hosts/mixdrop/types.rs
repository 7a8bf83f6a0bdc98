//! Mixdrop wire types.
//!
//! Mixdrop wraps every response in `{"success": bool, "result": ...}`;
//! on failure `result` is `{"msg": "..."}`. Timestamps are epoch
//! milliseconds carried as strings.

use serde::Deserialize;

/// The outer `{success, result}` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct MixdropEnvelope {
    pub success: bool,
    #[serde(default)]
    pub result: serde_json::Value,
}

/// `result` shape when `success` is false.
#[derive(Debug, Deserialize)]
pub(crate) struct MixdropErrorResult {
    #[serde(default)]
    pub msg: Option<String>,
}

/// A file entry inside a `folderlist` result.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MixdropFile {
    pub fileref: String,
    pub title: String,
    /// Epoch milliseconds, as a string.
    pub added: String,
    pub size: u64,
}

/// A folder entry inside a `folderlist` result.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MixdropFolder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub parent: Option<String>,
}

/// `result` of `GET /folderlist`.
#[derive(Debug, Deserialize)]
pub(crate) struct MixdropFolderList {
    #[serde(default)]
    pub folders: Vec<MixdropFolder>,
    #[serde(default)]
    pub files: Vec<MixdropFile>,
}

/// `result` of `GET /foldercreate`.
#[derive(Debug, Deserialize)]
pub(crate) struct MixdropCreatedFolder {
    pub id: String,
}

/// `result` of an upload POST.
#[derive(Debug, Deserialize)]
pub(crate) struct MixdropUploadResult {
    pub fileref: String,
}
