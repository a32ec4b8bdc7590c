//! Database model for assets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::str::FromStr;

use folio_core::assets::{Asset, AssetType};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetDB {
    pub id: String,
    pub owner_id: String,
    pub symbol: String,
    pub name: Option<String>,
    pub asset_type: String,
    pub created_at: NaiveDateTime,
}

impl From<AssetDB> for Asset {
    fn from(db: AssetDB) -> Self {
        let asset_type = AssetType::from_str(&db.asset_type).unwrap_or_else(|e| {
            log::warn!("{} on asset {}; reading it as OTHER", e, db.id);
            AssetType::Other
        });

        Self {
            id: db.id,
            owner_id: db.owner_id,
            symbol: db.symbol,
            name: db.name,
            asset_type,
            created_at: db.created_at,
        }
    }
}

impl From<Asset> for AssetDB {
    fn from(domain: Asset) -> Self {
        Self {
            id: domain.id,
            owner_id: domain.owner_id,
            symbol: domain.symbol,
            name: domain.name,
            asset_type: domain.asset_type.as_str().to_string(),
            created_at: domain.created_at,
        }
    }
}
