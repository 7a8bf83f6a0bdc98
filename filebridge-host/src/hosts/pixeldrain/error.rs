//! Pixeldrain error mapping
//!
//! Pixeldrain reports failures as `{"success": false, "value": "<code>",
//! "message": "..."}`; `value` is a stable machine-readable code.

use crate::error::HostError;
use crate::traits::{ErrorContext, HostErrorMapper, RawApiError};

use super::PixeldrainHost;

impl HostErrorMapper for PixeldrainHost {
    fn host_name(&self) -> &'static str {
        "pixeldrain"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> HostError {
        match raw.code.as_deref() {
            Some("authentication_required" | "authentication_failed" | "unauthorized") => {
                HostError::InvalidCredentials {
                    host: self.host_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            Some("not_found" | "file_not_found") => HostError::FileNotFound {
                host: self.host_name().to_string(),
                file_id: context.file_id.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            Some("list_not_found") => HostError::FolderNotFound {
                host: self.host_name().to_string(),
                folder_id: context
                    .folder_id
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
