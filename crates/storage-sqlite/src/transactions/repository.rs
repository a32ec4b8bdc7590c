use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use folio_core::transactions::{Transaction, TransactionRepositoryTrait};
use folio_core::utils::pagination::Page;
use folio_core::{Error, Result};

use super::model::{into_domain, TransactionDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;

pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create(&self, transaction: Transaction) -> Result<Transaction> {
        let transaction_db: TransactionDB = transaction.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let result_db = diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Transaction::try_from(result_db)
            })
            .await
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        let transaction_db: TransactionDB = transaction.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let updated = diesel::update(
                    transactions::table
                        .filter(transactions::id.eq(&transaction_db.id))
                        .filter(transactions::owner_id.eq(&transaction_db.owner_id)),
                )
                .set(&transaction_db)
                .execute(conn)
                .map_err(StorageError::from)?;

                if updated == 0 {
                    return Err(Error::NotFound(format!(
                        "Transaction {}",
                        transaction_db.id
                    )));
                }

                let result_db = transactions::table
                    .find(&transaction_db.id)
                    .select(TransactionDB::as_select())
                    .first::<TransactionDB>(conn)
                    .map_err(StorageError::from)?;
                Transaction::try_from(result_db)
            })
            .await
    }

    async fn delete(&self, transaction_id: &str, owner_id: &str) -> Result<usize> {
        let transaction_id = transaction_id.to_string();
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    transactions::table
                        .filter(transactions::id.eq(transaction_id))
                        .filter(transactions::owner_id.eq(owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, transaction_id: &str, owner_id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let transaction_db = transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::owner_id.eq(owner_id))
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        transaction_db.map(Transaction::try_from).transpose()
    }

    fn list(&self, owner_id: &str, page: Page) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::owner_id.eq(owner_id))
            .select(TransactionDB::as_select())
            .order((
                transactions::transaction_date.desc(),
                transactions::id.desc(),
            ))
            .offset(page.skip)
            .limit(page.limit)
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_domain(rows)
    }

    fn list_for_asset(&self, asset_id: &str, owner_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::asset_id.eq(asset_id))
            .filter(transactions::owner_id.eq(owner_id))
            .select(TransactionDB::as_select())
            .order((transactions::transaction_date.asc(), transactions::id.asc()))
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_domain(rows)
    }
}
