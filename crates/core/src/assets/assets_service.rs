use log::{info, warn};
use std::sync::Arc;

use super::assets_model::{normalize_symbol, Asset, NewAsset};
use super::assets_traits::{AssetRepositoryTrait, AssetServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::utils::pagination::Page;

/// Service for managing a user's assets.
pub struct AssetService {
    repository: Arc<dyn AssetRepositoryTrait>,
}

impl AssetService {
    pub fn new(repository: Arc<dyn AssetRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn duplicate_symbol(symbol: &str) -> Error {
        Error::ConstraintViolation(format!("Asset with symbol '{}' already exists", symbol))
    }
}

#[async_trait::async_trait]
impl AssetServiceTrait for AssetService {
    async fn create_asset(&self, owner_id: &str, new_asset: NewAsset) -> Result<Asset> {
        new_asset.validate()?;
        let new_asset = new_asset.normalized();

        if self
            .repository
            .find_by_symbol(&new_asset.symbol, owner_id)?
            .is_some()
        {
            warn!(
                "Asset {} already exists for user {}",
                new_asset.symbol, owner_id
            );
            return Err(Self::duplicate_symbol(&new_asset.symbol));
        }

        let asset = Asset {
            id: uuid::Uuid::now_v7().to_string(),
            owner_id: owner_id.to_string(),
            symbol: new_asset.symbol,
            name: new_asset.name,
            asset_type: new_asset.asset_type,
            created_at: chrono::Utc::now().naive_utc(),
        };
        let symbol = asset.symbol.clone();

        let created = self.repository.create(asset).await.map_err(|e| match e {
            Error::Database(DatabaseError::UniqueViolation(_)) => {
                warn!("Asset {} already exists for user {}", symbol, owner_id);
                Self::duplicate_symbol(&symbol)
            }
            other => other,
        })?;
        info!("Created asset {} ({})", created.symbol, created.id);
        Ok(created)
    }

    fn get_asset(&self, asset_id: &str, owner_id: &str) -> Result<Option<Asset>> {
        self.repository.get_by_id(asset_id, owner_id)
    }

    fn get_asset_by_symbol(&self, symbol: &str, owner_id: &str) -> Result<Option<Asset>> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return Ok(None);
        }
        self.repository.find_by_symbol(&symbol, owner_id)
    }

    fn list_assets(
        &self,
        owner_id: &str,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Asset>> {
        self.repository.list(owner_id, Page::new(skip, limit))
    }

    fn list_all_assets(&self, owner_id: &str) -> Result<Vec<Asset>> {
        let mut page = Page::all();
        let mut assets = Vec::new();
        loop {
            let batch = self.repository.list(owner_id, page)?;
            let fetched = batch.len() as i64;
            assets.extend(batch);
            if fetched < page.limit {
                break;
            }
            page.skip += fetched;
        }
        Ok(assets)
    }

    async fn delete_asset(&self, asset_id: &str, owner_id: &str) -> Result<bool> {
        let deleted = self.repository.delete(asset_id, owner_id).await?;
        if deleted == 0 {
            warn!(
                "Asset {} not found or not owned by user {}",
                asset_id, owner_id
            );
            return Ok(false);
        }
        info!("Deleted asset {}", asset_id);
        Ok(true)
    }
}
