//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use filebridge_host::HostError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No usable identity on the request
    #[error("Not authenticated")]
    Unauthenticated,

    /// No stored credential for the requested host
    #[error("No credentials for host: {0}")]
    CredentialMissing(String),

    /// The requested host is not supported
    #[error("Unsupported host: {0}")]
    UnsupportedHost(String),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The anonymous token has expired
    #[error("Token expired")]
    TokenExpired,

    /// The anonymous token is malformed or its signature does not verify
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Host error (converting from library)
    #[error("{0}")]
    Host(#[from] HostError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not
    /// exist, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Unauthenticated
            | Self::CredentialMissing(_)
            | Self::UnsupportedHost(_)
            | Self::AccountNotFound(_)
            | Self::ValidationError(_)
            | Self::TokenExpired
            | Self::InvalidToken(_) => true,
            Self::Host(e) => e.is_expected(),
            _ => false,
        }
    }

    /// The HTTP status an API layer should report for this error.
    ///
    /// Host errors delegate to [`HostError::http_status`], which keeps the
    /// upstream-failure / genuinely-missing distinction intact.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthenticated
            | Self::CredentialMissing(_)
            | Self::TokenExpired
            | Self::InvalidToken(_) => 401,
            Self::UnsupportedHost(_) | Self::AccountNotFound(_) => 404,
            Self::ValidationError(_) => 400,
            Self::StorageError(_) | Self::SerializationError(_) | Self::InternalError(_) => 500,
            Self::Host(e) => e.http_status(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
