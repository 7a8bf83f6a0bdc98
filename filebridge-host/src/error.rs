use serde::{Deserialize, Serialize};

/// Unified error type for all host operations.
///
/// Each variant includes a `host` field identifying which host produced the
/// error, plus variant-specific context. All variants are serializable for
/// structured error reporting. The host's native error schema never leaks
/// above the adapter boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum HostError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, etc.).
    NetworkError {
        /// Host that produced the error.
        host: String,
        /// Error details.
        detail: String,
    },

    /// The per-call timeout elapsed before the host responded.
    ///
    /// Adapters never retry; retries are a caller concern.
    Timeout {
        /// Host that produced the error.
        host: String,
        /// Error details.
        detail: String,
    },

    /// The provided credentials are invalid or expired.
    InvalidCredentials {
        /// Host that produced the error.
        host: String,
        /// Original error message from the host API, if available.
        raw_message: Option<String>,
    },

    /// The specified file was not found.
    FileNotFound {
        /// Host that produced the error.
        host: String,
        /// ID of the file that was not found.
        file_id: String,
        /// Original error message from the host API, if available.
        raw_message: Option<String>,
    },

    /// The specified folder was not found.
    FolderNotFound {
        /// Host that produced the error.
        host: String,
        /// ID of the folder that was not found.
        folder_id: String,
        /// Original error message from the host API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    RateLimited {
        /// Host that produced the error.
        host: String,
        /// Suggested wait time in seconds before retrying, if provided.
        retry_after: Option<u64>,
        /// Original error message from the host API, if available.
        raw_message: Option<String>,
    },

    /// The host rejected the call with a plain HTTP error.
    ///
    /// Carries the host's reported status so callers can distinguish
    /// upstream rejection from local failure.
    Api {
        /// Host that produced the error.
        host: String,
        /// HTTP status reported by the host.
        status: u16,
        /// Response body or message.
        message: String,
    },

    /// Failed to parse the host's API response.
    ParseError {
        /// Host that produced the error.
        host: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// An unrecognized error from the host API.
    ///
    /// Catch-all for error codes/messages not yet mapped to a specific
    /// variant.
    Unknown {
        /// Host that produced the error.
        host: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl HostError {
    /// Whether this is expected behavior (bad input, missing resource),
    /// used for log level selection: `warn` when `true`, `error` otherwise.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::FileNotFound { .. }
                | Self::FolderNotFound { .. }
                | Self::RateLimited { .. }
        )
    }

    /// The HTTP status a gateway should report for this error.
    ///
    /// Host-side failures map to 502 rather than 404: only genuinely
    /// missing resources produce 404.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidCredentials { .. } => 401,
            Self::FileNotFound { .. } | Self::FolderNotFound { .. } => 404,
            Self::RateLimited { .. } => 429,
            Self::Timeout { .. } => 504,
            // 4xx from the host is the caller's fault and passes through;
            // everything else is an upstream failure.
            Self::Api { status, .. } if (400..=499).contains(status) => *status,
            Self::Api { .. }
            | Self::NetworkError { .. }
            | Self::ParseError { .. }
            | Self::Unknown { .. } => 502,
        }
    }
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { host, detail } => {
                write!(f, "[{host}] Network error: {detail}")
            }
            Self::Timeout { host, detail } => {
                write!(f, "[{host}] Request timeout: {detail}")
            }
            Self::InvalidCredentials { host, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{host}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{host}] Invalid credentials")
                }
            }
            Self::FileNotFound { host, file_id, .. } => {
                write!(f, "[{host}] File '{file_id}' not found")
            }
            Self::FolderNotFound {
                host, folder_id, ..
            } => {
                write!(f, "[{host}] Folder '{folder_id}' not found")
            }
            Self::RateLimited {
                host, retry_after, ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{host}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{host}] Rate limited")
                }
            }
            Self::Api {
                host,
                status,
                message,
            } => {
                write!(f, "[{host}] API error (HTTP {status}): {message}")
            }
            Self::ParseError { host, detail } => {
                write!(f, "[{host}] Parse error: {detail}")
            }
            Self::Unknown {
                host, raw_message, ..
            } => {
                write!(f, "[{host}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for HostError {}

/// Convenience type alias for `Result<T, HostError>`.
pub type Result<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = HostError::NetworkError {
            host: "test".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Network error: connection refused");
    }

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = HostError::InvalidCredentials {
            host: "mixdrop".to_string(),
            raw_message: Some("invalid key".to_string()),
        };
        assert_eq!(e.to_string(), "[mixdrop] Invalid credentials: invalid key");
    }

    #[test]
    fn display_file_not_found() {
        let e = HostError::FileNotFound {
            host: "pixeldrain".to_string(),
            file_id: "abc".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[pixeldrain] File 'abc' not found");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = HostError::RateLimited {
            host: "mixdrop".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[mixdrop] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_api_error() {
        let e = HostError::Api {
            host: "pixeldrain".to_string(),
            status: 413,
            message: "payload too large".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[pixeldrain] API error (HTTP 413): payload too large"
        );
    }

    #[test]
    fn status_auth_is_401() {
        let e = HostError::InvalidCredentials {
            host: "t".to_string(),
            raw_message: None,
        };
        assert_eq!(e.http_status(), 401);
    }

    #[test]
    fn status_missing_resources_are_404() {
        let file = HostError::FileNotFound {
            host: "t".to_string(),
            file_id: "x".to_string(),
            raw_message: None,
        };
        let folder = HostError::FolderNotFound {
            host: "t".to_string(),
            folder_id: "x".to_string(),
            raw_message: None,
        };
        assert_eq!(file.http_status(), 404);
        assert_eq!(folder.http_status(), 404);
    }

    #[test]
    fn status_upstream_failures_are_502() {
        let network = HostError::NetworkError {
            host: "t".to_string(),
            detail: "x".to_string(),
        };
        let parse = HostError::ParseError {
            host: "t".to_string(),
            detail: "x".to_string(),
        };
        let unknown = HostError::Unknown {
            host: "t".to_string(),
            raw_code: None,
            raw_message: "x".to_string(),
        };
        assert_eq!(network.http_status(), 502);
        assert_eq!(parse.http_status(), 502);
        assert_eq!(unknown.http_status(), 502);
    }

    #[test]
    fn status_api_4xx_passes_through() {
        let e = HostError::Api {
            host: "t".to_string(),
            status: 413,
            message: "too large".to_string(),
        };
        assert_eq!(e.http_status(), 413);
    }

    #[test]
    fn status_api_5xx_becomes_502() {
        let e = HostError::Api {
            host: "t".to_string(),
            status: 500,
            message: "oops".to_string(),
        };
        assert_eq!(e.http_status(), 502);
    }

    #[test]
    fn status_timeout_is_504() {
        let e = HostError::Timeout {
            host: "t".to_string(),
            detail: "30s".to_string(),
        };
        assert_eq!(e.http_status(), 504);
    }

    #[test]
    fn expected_variants() {
        assert!(HostError::InvalidCredentials {
            host: "t".to_string(),
            raw_message: None,
        }
        .is_expected());
        assert!(HostError::FileNotFound {
            host: "t".to_string(),
            file_id: "x".to_string(),
            raw_message: None,
        }
        .is_expected());
        assert!(!HostError::NetworkError {
            host: "t".to_string(),
            detail: "x".to_string(),
        }
        .is_expected());
        assert!(!HostError::ParseError {
            host: "t".to_string(),
            detail: "x".to_string(),
        }
        .is_expected());
    }

    #[test]
    fn serialize_json_tagged_by_code() {
        let e = HostError::RateLimited {
            host: "mixdrop".to_string(),
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }

    #[test]
    fn deserialize_round_trip() {
        let original = HostError::Api {
            host: "pixeldrain".to_string(),
            status: 413,
            message: "too large".to_string(),
        };
        let json = serde_json::to_string(&original).unwrap();
        let back: HostError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), original.to_string());
    }
}
