use log::{debug, info, warn};
use std::str::FromStr;
use std::sync::Arc;

use super::transactions_model::{
    normalize_notes, validate_amounts, NewTransaction, Transaction, TransactionType,
    TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::assets::AssetServiceTrait;
use crate::errors::{Error, Result};
use crate::utils::decimal_utils::AmountInput;
use crate::utils::pagination::Page;
use crate::utils::time_utils::parse_datetime_input;

/// Service for recording and editing trades.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    asset_service: Arc<dyn AssetServiceTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        asset_service: Arc<dyn AssetServiceTrait>,
    ) -> Self {
        Self {
            repository,
            asset_service,
        }
    }

    fn ensure_asset_owned(&self, asset_id: &str, owner_id: &str) -> Result<()> {
        match self.asset_service.get_asset(asset_id, owner_id)? {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(format!("Asset {}", asset_id))),
        }
    }

    /// Applies `update` over `existing`, producing the record to store.
    fn merge(&self, existing: &Transaction, update: TransactionUpdate) -> Result<Transaction> {
        let mut merged = existing.clone();

        if let Some(asset_id) = update.asset_id {
            let asset_id = asset_id.trim().to_string();
            if asset_id != existing.asset_id {
                self.ensure_asset_owned(&asset_id, &existing.owner_id)?;
            }
            merged.asset_id = asset_id;
        }

        if let Some(raw_type) = update.transaction_type {
            merged.transaction_type =
                TransactionType::from_str(&raw_type).map_err(Error::invalid_input)?;
        }

        let quantity = update
            .quantity
            .unwrap_or_else(|| AmountInput::from(existing.quantity));
        let price_per_unit = update
            .price_per_unit
            .unwrap_or_else(|| AmountInput::from(existing.price_per_unit));
        let fees = update
            .fees
            .unwrap_or_else(|| AmountInput::from(existing.fees));
        let amounts = validate_amounts(&quantity, &price_per_unit, Some(&fees))?;
        merged.quantity = amounts.quantity;
        merged.price_per_unit = amounts.price_per_unit;
        merged.fees = amounts.fees;

        if let Some(raw_date) = update.transaction_date {
            merged.transaction_date = parse_datetime_input(&raw_date)?;
        }

        if let Some(notes) = update.notes {
            merged.notes = normalize_notes(Some(&notes));
        }

        Ok(merged)
    }
}

#[async_trait::async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(
        &self,
        owner_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        let asset_id = new_transaction.asset_id.trim().to_string();
        self.ensure_asset_owned(&asset_id, owner_id)?;

        let amounts = validate_amounts(
            &new_transaction.quantity,
            &new_transaction.price_per_unit,
            new_transaction.fees.as_ref(),
        )?;

        let now = chrono::Utc::now().naive_utc();
        let transaction_date = match new_transaction.transaction_date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_datetime_input(raw)?,
            _ => now,
        };

        let transaction = Transaction {
            id: uuid::Uuid::now_v7().to_string(),
            owner_id: owner_id.to_string(),
            asset_id,
            transaction_type: new_transaction.transaction_type,
            quantity: amounts.quantity,
            price_per_unit: amounts.price_per_unit,
            fees: amounts.fees,
            transaction_date,
            notes: normalize_notes(new_transaction.notes.as_deref()),
            created_at: now,
        };

        let created = self.repository.create(transaction).await?;
        info!(
            "Recorded {} of {} for asset {} ({})",
            created.transaction_type, created.quantity, created.asset_id, created.id
        );
        Ok(created)
    }

    fn get_transaction(
        &self,
        transaction_id: &str,
        owner_id: &str,
    ) -> Result<Option<Transaction>> {
        self.repository.get_by_id(transaction_id, owner_id)
    }

    fn list_transactions(
        &self,
        owner_id: &str,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        self.repository.list(owner_id, Page::new(skip, limit))
    }

    fn list_transactions_for_asset(
        &self,
        asset_id: &str,
        owner_id: &str,
    ) -> Result<Vec<Transaction>> {
        self.ensure_asset_owned(asset_id, owner_id)?;
        self.repository.list_for_asset(asset_id, owner_id)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        owner_id: &str,
        update: TransactionUpdate,
    ) -> Result<Option<Transaction>> {
        let existing = match self.repository.get_by_id(transaction_id, owner_id)? {
            Some(tx) => tx,
            None => {
                warn!(
                    "Transaction {} not found or not owned by user {}",
                    transaction_id, owner_id
                );
                return Ok(None);
            }
        };

        if update.is_empty() {
            return Ok(Some(existing));
        }

        let merged = self.merge(&existing, update)?;
        if merged == existing {
            debug!("Update of transaction {} changed nothing", transaction_id);
            return Ok(Some(existing));
        }

        let updated = self.repository.update(merged).await?;
        info!("Updated transaction {}", updated.id);
        Ok(Some(updated))
    }

    async fn delete_transaction(&self, transaction_id: &str, owner_id: &str) -> Result<bool> {
        let deleted = self.repository.delete(transaction_id, owner_id).await?;
        if deleted == 0 {
            warn!(
                "Transaction {} not found or not owned by user {}",
                transaction_id, owner_id
            );
            return Ok(false);
        }
        info!("Deleted transaction {}", transaction_id);
        Ok(true)
    }
}
