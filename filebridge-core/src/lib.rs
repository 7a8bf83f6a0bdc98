//! FileBridge Core Library
//!
//! Business logic for the multi-host file gateway:
//! - per-host credential records, stored on accounts or carried in signed
//!   anonymous tokens
//! - identity resolution (session wins over token)
//! - a uniform operation surface over the host adapters
//!
//! The storage layer is abstracted through traits so the same logic runs
//! against any platform backend.

pub mod error;
pub mod services;
pub mod token;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, HostError};
pub use services::{CredentialService, GatewayService, IdentityService, RequestEvidence};
pub use token::{TokenCodec, TokenPayload, DEFAULT_TOKEN_TTL_SECS};
pub use traits::AccountRepository;
