//! Business logic service layer

mod credential_service;
mod gateway_service;
mod identity_service;

pub use credential_service::CredentialService;
pub use gateway_service::GatewayService;
pub use identity_service::{IdentityService, RequestEvidence};
