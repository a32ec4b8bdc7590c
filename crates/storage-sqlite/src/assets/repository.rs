use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use folio_core::assets::{Asset, AssetRepositoryTrait};
use folio_core::utils::pagination::Page;
use folio_core::Result;

use super::model::AssetDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::assets;

pub struct AssetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AssetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        AssetRepository { pool, writer }
    }
}

#[async_trait]
impl AssetRepositoryTrait for AssetRepository {
    async fn create(&self, asset: Asset) -> Result<Asset> {
        let asset_db: AssetDB = asset.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let result_db = diesel::insert_into(assets::table)
                    .values(&asset_db)
                    .returning(AssetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Asset::from(result_db))
            })
            .await
    }

    async fn delete(&self, asset_id: &str, owner_id: &str) -> Result<usize> {
        let asset_id = asset_id.to_string();
        let owner_id = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Transactions go with the asset through ON DELETE CASCADE.
                diesel::delete(
                    assets::table
                        .filter(assets::id.eq(asset_id))
                        .filter(assets::owner_id.eq(owner_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }

    fn get_by_id(&self, asset_id: &str, owner_id: &str) -> Result<Option<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        let asset_db = assets::table
            .filter(assets::id.eq(asset_id))
            .filter(assets::owner_id.eq(owner_id))
            .select(AssetDB::as_select())
            .first::<AssetDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(asset_db.map(Asset::from))
    }

    fn find_by_symbol(&self, symbol: &str, owner_id: &str) -> Result<Option<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        let asset_db = assets::table
            .filter(assets::symbol.eq(symbol))
            .filter(assets::owner_id.eq(owner_id))
            .select(AssetDB::as_select())
            .first::<AssetDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(asset_db.map(Asset::from))
    }

    fn list(&self, owner_id: &str, page: Page) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;
        let assets_db = assets::table
            .filter(assets::owner_id.eq(owner_id))
            .select(AssetDB::as_select())
            .order(assets::symbol.asc())
            .offset(page.skip)
            .limit(page.limit)
            .load::<AssetDB>(&mut conn)
            .into_core()?;
        Ok(assets_db.into_iter().map(Asset::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::Utc;
    use folio_core::assets::AssetType;
    use folio_core::errors::{DatabaseError, Error};
    use tempfile::tempdir;

    async fn create_test_repository() -> (
        AssetRepository,
        Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        tempfile::TempDir,
    ) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        let repo = AssetRepository::new(Arc::clone(&pool), writer);
        (repo, pool, temp_dir)
    }

    /// Inserts an owner row to satisfy the foreign key.
    fn create_test_user(pool: &Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>, id: &str) {
        let mut conn = get_connection(pool).expect("Failed to get connection");
        diesel::sql_query(format!(
            "INSERT INTO users (id, username, email, password_hash, created_at) \
             VALUES ('{id}', '{id}', '{id}@example.com', 'x', '2024-01-01 00:00:00')"
        ))
        .execute(&mut conn)
        .expect("Failed to insert test user");
    }

    fn asset(id: &str, owner: &str, symbol: &str) -> Asset {
        Asset {
            id: id.to_string(),
            owner_id: owner.to_string(),
            symbol: symbol.to_string(),
            name: None,
            asset_type: AssetType::Etf,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn test_create_get_and_list_ordered_by_symbol() {
        let (repo, pool, _dir) = create_test_repository().await;
        create_test_user(&pool, "u1");

        repo.create(asset("a1", "u1", "MSFT")).await.unwrap();
        repo.create(asset("a2", "u1", "AAPL")).await.unwrap();

        let fetched = repo.get_by_id("a1", "u1").unwrap().unwrap();
        assert_eq!(fetched.symbol, "MSFT");
        assert_eq!(fetched.asset_type, AssetType::Etf);

        let symbols: Vec<String> = repo
            .list("u1", Page::default())
            .unwrap()
            .into_iter()
            .map(|a| a.symbol)
            .collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[tokio::test]
    async fn test_lookups_are_owner_scoped() {
        let (repo, pool, _dir) = create_test_repository().await;
        create_test_user(&pool, "u1");
        create_test_user(&pool, "u2");

        repo.create(asset("a1", "u1", "AAPL")).await.unwrap();
        // Same symbol for another owner is allowed.
        repo.create(asset("a2", "u2", "AAPL")).await.unwrap();

        assert!(repo.get_by_id("a1", "u2").unwrap().is_none());
        assert_eq!(repo.find_by_symbol("AAPL", "u2").unwrap().unwrap().id, "a2");
        assert_eq!(repo.delete("a1", "u2").await.unwrap(), 0);
        assert_eq!(repo.delete("a1", "u1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_symbol_per_owner_is_rejected() {
        let (repo, pool, _dir) = create_test_repository().await;
        create_test_user(&pool, "u1");
        repo.create(asset("a1", "u1", "AAPL")).await.unwrap();

        let err = repo.create(asset("a2", "u1", "AAPL")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_owner_is_foreign_key_violation() {
        let (repo, _pool, _dir) = create_test_repository().await;
        let err = repo.create(asset("a1", "ghost", "AAPL")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
    }
}
