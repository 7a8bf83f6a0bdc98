//! Test helper module
//!
//! Mock implementations and factory helpers shared by the service tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::GatewayService;
use crate::token::TokenCodec;
use crate::traits::AccountRepository;
use crate::types::{Account, Credential};

// ===== MockAccountRepository =====

pub struct MockAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
    /// When Some, `save` returns this error (for storage-failure paths).
    save_error: RwLock<Option<String>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            save_error: RwLock::new(None),
        }
    }

    #[allow(dead_code)]
    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Account>> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn save(&self, account: &Account) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.accounts
            .write()
            .await
            .insert(account.id.clone(), account.clone());
        Ok(())
    }
}

// ===== Factories =====

/// An account with fixed metadata and the given credentials.
pub fn test_account(id: &str, credentials: Vec<Credential>) -> Account {
    let now = Utc::now();
    Account {
        id: id.to_string(),
        username: format!("user-{id}"),
        email: format!("{id}@example.com"),
        password_hash: "hash".to_string(),
        credentials,
        created_at: now,
        updated_at: now,
    }
}

/// A codec with a fixed secret, so independently created codecs can decode
/// each other's tokens.
pub fn test_codec() -> TokenCodec {
    TokenCodec::new("test-secret")
}

/// A gateway over a fresh mock repository, returned alongside the
/// repository so tests can seed accounts.
pub fn create_test_gateway() -> (GatewayService, Arc<MockAccountRepository>) {
    let repo = Arc::new(MockAccountRepository::new());
    let gateway = GatewayService::new(repo.clone(), Arc::new(test_codec()));
    (gateway, repo)
}
