//! Mixdrop error mapping
//!
//! Mixdrop reports failures as `{"success": false, "result": {"msg": …}}`
//! with no machine-readable code, so classification keys on the message
//! text.

use crate::error::HostError;
use crate::traits::{ErrorContext, HostErrorMapper, RawApiError};

use super::MixdropHost;

impl HostErrorMapper for MixdropHost {
    fn host_name(&self) -> &'static str {
        "mixdrop"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> HostError {
        let msg = raw.message.to_lowercase();

        if (msg.contains("invalid") && (msg.contains("key") || msg.contains("email")))
            || msg.contains("unauthorized")
            || msg.contains("wrong credentials")
        {
            return HostError::InvalidCredentials {
                host: self.host_name().to_string(),
                raw_message: Some(raw.message),
            };
        }

        if msg.contains("not found") || msg.contains("no such") {
            if msg.contains("folder") {
                return HostError::FolderNotFound {
                    host: self.host_name().to_string(),
                    folder_id: context
                        .folder_id
                        .unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                };
            }
            return HostError::FileNotFound {
                host: self.host_name().to_string(),
                file_id: context.file_id.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            };
        }

        if msg.contains("rate limit") || msg.contains("too many requests") {
            return HostError::RateLimited {
                host: self.host_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            };
        }

        self.unknown_error(raw)
    }
}
