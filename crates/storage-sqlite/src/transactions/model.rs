//! Database model for transactions.
//!
//! Amounts are stored as TEXT to keep decimals exact.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::str::FromStr;

use folio_core::errors::{DatabaseError, Error};
use folio_core::transactions::{Transaction, TransactionType};

use crate::utils::parse_decimal_string_tolerant;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: String,
    pub owner_id: String,
    pub asset_id: String,
    pub transaction_type: String,
    pub quantity: String,
    pub price_per_unit: String,
    pub fees: String,
    pub transaction_date: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        let transaction_type = TransactionType::from_str(&db.transaction_type).map_err(|e| {
            Error::Database(DatabaseError::Internal(format!(
                "Transaction {} has an invalid type: {}",
                db.id, e
            )))
        })?;

        Ok(Self {
            quantity: parse_decimal_string_tolerant(&db.quantity, "quantity"),
            price_per_unit: parse_decimal_string_tolerant(&db.price_per_unit, "price_per_unit"),
            fees: parse_decimal_string_tolerant(&db.fees, "fees"),
            id: db.id,
            owner_id: db.owner_id,
            asset_id: db.asset_id,
            transaction_type,
            transaction_date: db.transaction_date,
            notes: db.notes,
            created_at: db.created_at,
        })
    }
}

impl From<Transaction> for TransactionDB {
    fn from(domain: Transaction) -> Self {
        Self {
            id: domain.id,
            owner_id: domain.owner_id,
            asset_id: domain.asset_id,
            transaction_type: domain.transaction_type.as_str().to_string(),
            quantity: domain.quantity.to_string(),
            price_per_unit: domain.price_per_unit.to_string(),
            fees: domain.fees.to_string(),
            transaction_date: domain.transaction_date,
            notes: domain.notes,
            created_at: domain.created_at,
        }
    }
}

pub(crate) fn into_domain(rows: Vec<TransactionDB>) -> folio_core::Result<Vec<Transaction>> {
    rows.into_iter().map(Transaction::try_from).collect()
}
