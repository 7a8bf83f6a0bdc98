//! Credential store service
//!
//! The same list operations against both backends: the account store for
//! logged-in users, the signed token for anonymous visitors. Token-backed
//! operations are pure over the decoded payload and re-issue a fresh
//! token; nothing anonymous touches storage.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::token::TokenCodec;
use crate::traits::AccountRepository;
use crate::types::{remove_credential, upsert_credential, Account, Credential};

/// Credential management over accounts and anonymous tokens.
pub struct CredentialService {
    account_repository: Arc<dyn AccountRepository>,
    token_codec: Arc<TokenCodec>,
}

impl CredentialService {
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

    async fn load_account(&self, account_id: &str) -> CoreResult<Account> {
        self.account_repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))
    }

    // ===== Account-backed =====

    /// List an account's credentials.
    pub async fn list(&self, account_id: &str) -> CoreResult<Vec<Credential>> {
        Ok(self.load_account(account_id).await?.credentials)
    }

    /// Insert or replace one credential on an account.
    pub async fn upsert(
        &self,
        account_id: &str,
        entry: Credential,
    ) -> CoreResult<Vec<Credential>> {
        let mut account = self.load_account(account_id).await?;
        upsert_credential(&mut account.credentials, entry);
        account.updated_at = Utc::now();
        self.account_repository.save(&account).await?;
        Ok(account.credentials)
    }

    /// Remove one host's credential from an account.
    pub async fn remove(&self, account_id: &str, host: &str) -> CoreResult<Vec<Credential>> {
        let mut account = self.load_account(account_id).await?;
        remove_credential(&mut account.credentials, host);
        account.updated_at = Utc::now();
        self.account_repository.save(&account).await?;
        Ok(account.credentials)
    }

    // ===== Token-backed =====

    /// List the credentials embedded in a token.
    pub fn list_from_token(&self, token: &str) -> CoreResult<Vec<Credential>> {
        Ok(self.token_codec.decode(token)?.api_data)
    }

    /// Insert or replace one credential in a token, returning a freshly
    /// signed token.
    ///
    /// An absent, invalid or expired prior token starts a new list: the
    /// first credential an anonymous visitor submits has no token yet.
    pub fn upsert_into_token(
        &self,
        prior_token: Option<&str>,
        entry: Credential,
    ) -> CoreResult<String> {
        let mut list = prior_token
            .and_then(|t| self.token_codec.decode(t).ok())
            .map(|p| p.api_data)
            .unwrap_or_default();
        upsert_credential(&mut list, entry);
        self.token_codec.encode(list)
    }

    /// Remove one host's credential from a token, returning a freshly
    /// signed token.
    pub fn remove_from_token(&self, token: &str, host: &str) -> CoreResult<String> {
        let mut list = self.token_codec.decode(token)?.api_data;
        remove_credential(&mut list, host);
        self.token_codec.encode(list)
    }

    // ===== Migration =====

    /// Merge a token's credentials into an account, for a visitor who
    /// logs in after working anonymously. Account entries win on host
    /// conflict; the merge only fills gaps. Explicitly opt-in: callers
    /// decide when (and whether) to invoke it.
    pub async fn merge_token_into_account(
        &self,
        account_id: &str,
        token: &str,
    ) -> CoreResult<Vec<Credential>> {
        let payload = self.token_codec.decode(token)?;
        let mut account = self.load_account(account_id).await?;
        let mut merged = 0usize;
        for entry in payload.api_data {
            let taken = account
                .credentials
                .iter()
                .any(|c| c.host.eq_ignore_ascii_case(&entry.host));
            if !taken && entry.is_present() {
                upsert_credential(&mut account.credentials, entry);
                merged += 1;
            }
        }
        if merged > 0 {
            account.updated_at = Utc::now();
            self.account_repository.save(&account).await?;
            log::info!("Merged {merged} anonymous credential(s) into account {account_id}");
        }
        Ok(account.credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_account, test_codec, MockAccountRepository};

    fn service(repo: Arc<MockAccountRepository>) -> CredentialService {
        CredentialService::new(repo, Arc::new(test_codec()))
    }

    fn cred(host: &str, key: &str) -> Credential {
        Credential {
            host: host.to_string(),
            api_key: key.to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn upsert_persists_and_returns_list() {
        let repo = Arc::new(MockAccountRepository::new());
        repo.save(&test_account("a1", Vec::new())).await.unwrap();
        let svc = service(repo.clone());

        let list = svc.upsert("a1", cred("pixeldrain", "k1")).await.unwrap();
        assert_eq!(list.len(), 1);

        let stored = repo.find_by_id("a1").await.unwrap().unwrap();
        assert_eq!(stored.credentials[0].api_key, "k1");
    }

    #[tokio::test]
    async fn upsert_replaces_same_host() {
        let repo = Arc::new(MockAccountRepository::new());
        repo.save(&test_account("a1", vec![cred("pixeldrain", "old")]))
            .await
            .unwrap();
        let svc = service(repo);

        let list = svc.upsert("a1", cred("Pixeldrain", "new")).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].api_key, "new");
        assert_eq!(list[0].host, "pixeldrain");
    }

    #[tokio::test]
    async fn remove_then_list_round_trip() {
        let repo = Arc::new(MockAccountRepository::new());
        repo.save(&test_account(
            "a1",
            vec![cred("pixeldrain", "k1"), cred("mixdrop", "k2")],
        ))
        .await
        .unwrap();
        let svc = service(repo);

        let list = svc.remove("a1", "pixeldrain").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(svc.list("a1").await.unwrap()[0].host, "mixdrop");
    }

    #[tokio::test]
    async fn missing_account_is_reported() {
        let svc = service(Arc::new(MockAccountRepository::new()));
        let err = svc.list("ghost").await.unwrap_err();
        assert!(matches!(err, CoreError::AccountNotFound(id) if id == "ghost"));
    }

    #[tokio::test]
    async fn token_upsert_without_prior_starts_fresh() {
        let svc = service(Arc::new(MockAccountRepository::new()));
        let token = svc.upsert_into_token(None, cred("mixdrop", "k2")).unwrap();
        let list = svc.list_from_token(&token).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].host, "mixdrop");
    }

    #[tokio::test]
    async fn token_upsert_tolerates_invalid_prior() {
        let svc = service(Arc::new(MockAccountRepository::new()));
        let token = svc
            .upsert_into_token(Some("expired-garbage"), cred("pixeldrain", "k1"))
            .unwrap();
        assert_eq!(svc.list_from_token(&token).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn token_remove_reissues() {
        let svc = service(Arc::new(MockAccountRepository::new()));
        let token = svc.upsert_into_token(None, cred("pixeldrain", "k1")).unwrap();
        let token = svc
            .upsert_into_token(Some(&token), cred("mixdrop", "k2"))
            .unwrap();
        let token = svc.remove_from_token(&token, "pixeldrain").unwrap();
        let list = svc.list_from_token(&token).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].host, "mixdrop");
    }

    #[tokio::test]
    async fn merge_fills_gaps_only() {
        let repo = Arc::new(MockAccountRepository::new());
        repo.save(&test_account("a1", vec![cred("pixeldrain", "account-key")]))
            .await
            .unwrap();
        let svc = service(repo.clone());
        let token = test_codec()
            .encode(vec![
                cred("pixeldrain", "token-key"),
                cred("mixdrop", "k2"),
            ])
            .unwrap();

        let merged = svc.merge_token_into_account("a1", &token).await.unwrap();
        assert_eq!(merged.len(), 2);
        // Account entry wins on conflict.
        assert_eq!(merged[0].host, "pixeldrain");
        assert_eq!(merged[0].api_key, "account-key");
        assert_eq!(merged[1].host, "mixdrop");
    }

    #[tokio::test]
    async fn merge_skips_empty_token_entries() {
        let repo = Arc::new(MockAccountRepository::new());
        repo.save(&test_account("a1", Vec::new())).await.unwrap();
        let svc = service(repo);
        let token = test_codec().encode(vec![cred("mixdrop", "")]).unwrap();

        let merged = svc.merge_token_into_account("a1", &token).await.unwrap();
        assert!(merged.is_empty());
    }
}
