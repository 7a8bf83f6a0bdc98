//! Account persistence abstract trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Account;

/// Account storage trait.
///
/// Writes are last-writer-wins; there is no optimistic concurrency
/// control. Platform layers supply the implementation.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Get account based on ID
    ///
    /// # Arguments
    /// * `id` - Account ID
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Account>>;

    /// Save account (new or update)
    ///
    /// # Arguments
    /// * `account` - Account data
    async fn save(&self, account: &Account) -> CoreResult<()>;
}
