//! Asset repository and service traits.

use async_trait::async_trait;

use super::assets_model::{Asset, NewAsset};
use crate::errors::Result;
use crate::utils::pagination::Page;

/// Persistence contract for assets. Every lookup is scoped to an owner.
#[async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    async fn create(&self, asset: Asset) -> Result<Asset>;

    /// Deletes an owned asset and its transactions.
    ///
    /// Returns the number of deleted asset rows.
    async fn delete(&self, asset_id: &str, owner_id: &str) -> Result<usize>;

    fn get_by_id(&self, asset_id: &str, owner_id: &str) -> Result<Option<Asset>>;

    /// Exact match on an already normalized symbol.
    fn find_by_symbol(&self, symbol: &str, owner_id: &str) -> Result<Option<Asset>>;

    /// Assets ordered by symbol.
    fn list(&self, owner_id: &str, page: Page) -> Result<Vec<Asset>>;
}

#[async_trait]
pub trait AssetServiceTrait: Send + Sync {
    /// Normalizes and validates the input, then stores the asset.
    ///
    /// Fails with a constraint violation when the owner already tracks the
    /// symbol.
    async fn create_asset(&self, owner_id: &str, new_asset: NewAsset) -> Result<Asset>;

    fn get_asset(&self, asset_id: &str, owner_id: &str) -> Result<Option<Asset>>;

    fn get_asset_by_symbol(&self, symbol: &str, owner_id: &str) -> Result<Option<Asset>>;

    fn list_assets(
        &self,
        owner_id: &str,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Asset>>;

    /// Every asset of the owner, across all pages.
    fn list_all_assets(&self, owner_id: &str) -> Result<Vec<Asset>>;

    /// Returns false when the asset does not exist or is not owned.
    async fn delete_asset(&self, asset_id: &str, owner_id: &str) -> Result<bool>;
}
