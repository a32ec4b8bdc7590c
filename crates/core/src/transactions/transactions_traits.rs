//! Transaction repository and service traits.

use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction, TransactionUpdate};
use crate::errors::Result;
use crate::utils::pagination::Page;

/// Persistence contract for transactions. Every lookup is scoped to an owner.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    async fn create(&self, transaction: Transaction) -> Result<Transaction>;

    /// Overwrites the stored row with the same id.
    async fn update(&self, transaction: Transaction) -> Result<Transaction>;

    /// Returns the number of deleted rows.
    async fn delete(&self, transaction_id: &str, owner_id: &str) -> Result<usize>;

    fn get_by_id(&self, transaction_id: &str, owner_id: &str) -> Result<Option<Transaction>>;

    /// Newest first: date descending, then id descending.
    fn list(&self, owner_id: &str, page: Page) -> Result<Vec<Transaction>>;

    /// Replay order: date ascending, then id ascending.
    fn list_for_asset(&self, asset_id: &str, owner_id: &str) -> Result<Vec<Transaction>>;
}

#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Records a trade against an owned asset.
    async fn create_transaction(
        &self,
        owner_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;

    fn get_transaction(
        &self,
        transaction_id: &str,
        owner_id: &str,
    ) -> Result<Option<Transaction>>;

    fn list_transactions(
        &self,
        owner_id: &str,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>>;

    /// All trades of one owned asset in replay order.
    fn list_transactions_for_asset(
        &self,
        asset_id: &str,
        owner_id: &str,
    ) -> Result<Vec<Transaction>>;

    /// Merges the update over the stored trade and revalidates it.
    ///
    /// Returns `None` when the trade does not exist or is not owned.
    async fn update_transaction(
        &self,
        transaction_id: &str,
        owner_id: &str,
        update: TransactionUpdate,
    ) -> Result<Option<Transaction>>;

    /// Returns false when the trade does not exist or is not owned.
    async fn delete_transaction(&self, transaction_id: &str, owner_id: &str) -> Result<bool>;
}
