//! Request identity resolution
//!
//! Turns whatever identity evidence a request carries into the credential
//! to use for one host. Pure lookup; nothing here mutates storage or
//! re-issues tokens.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::token::TokenCodec;
use crate::traits::AccountRepository;
use crate::types::{find_credential, Credential, HostType};

/// Identity evidence extracted from a request.
///
/// A request may carry a session (logged-in account), an anonymous
/// credential token, both, or neither.
#[derive(Debug, Clone, Default)]
pub struct RequestEvidence {
    /// Account ID from a validated session.
    pub session_account_id: Option<String>,
    /// Anonymous credential token.
    pub anon_token: Option<String>,
}

/// Resolves request evidence to a per-host credential.
pub struct IdentityService {
    account_repository: Arc<dyn AccountRepository>,
    token_codec: Arc<TokenCodec>,
}

impl IdentityService {
    #[must_use]
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        token_codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            account_repository,
            token_codec,
        }
    }

    /// Resolve the credential to use for `host`.
    ///
    /// A session wins over an anonymous token when both are present. A
    /// session naming a missing account is no usable identity
    /// (`Unauthenticated`); an identified account without a usable key for
    /// the host is `CredentialMissing`. On the token path every decode
    /// failure collapses to `Unauthenticated`: an anonymous caller with a
    /// bad token is indistinguishable from one with none.
    pub async fn resolve(
        &self,
        evidence: &RequestEvidence,
        host: HostType,
    ) -> CoreResult<Credential> {
        if let Some(account_id) = &evidence.session_account_id {
            let account = self
                .account_repository
                .find_by_id(account_id)
                .await?
                .ok_or(CoreError::Unauthenticated)?;
            return Self::pick(&account.credentials, host);
        }

        if let Some(token) = &evidence.anon_token {
            let payload = self
                .token_codec
                .decode(token)
                .map_err(|_| CoreError::Unauthenticated)?;
            return Self::pick(&payload.api_data, host);
        }

        Err(CoreError::Unauthenticated)
    }

    fn pick(list: &[Credential], host: HostType) -> CoreResult<Credential> {
        let credential = find_credential(list, &host.to_string())
            .ok_or_else(|| CoreError::CredentialMissing(host.to_string()))?;
        if !credential.is_present() {
            return Err(CoreError::CredentialMissing(host.to_string()));
        }
        Ok(credential.clone())
    }
}
