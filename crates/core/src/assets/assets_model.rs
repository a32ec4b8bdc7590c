//! Asset domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Broad category of a tracked instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    #[default]
    Stock,
    Crypto,
    Etf,
    MutualFund,
    Other,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "STOCK",
            AssetType::Crypto => "CRYPTO",
            AssetType::Etf => "ETF",
            AssetType::MutualFund => "MUTUAL_FUND",
            AssetType::Other => "OTHER",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    /// Case-insensitive; accepts `mutual fund` and `mutual-fund` too.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "STOCK" => Ok(AssetType::Stock),
            "CRYPTO" => Ok(AssetType::Crypto),
            "ETF" => Ok(AssetType::Etf),
            "MUTUAL_FUND" => Ok(AssetType::MutualFund),
            "OTHER" => Ok(AssetType::Other),
            _ => Err(format!("Unknown asset type: {}", s)),
        }
    }
}

/// Domain model representing a tracked asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub owner_id: String,
    pub symbol: String,
    pub name: Option<String>,
    pub asset_type: AssetType,
    pub created_at: NaiveDateTime,
}

/// Input model for creating an asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub asset_type: AssetType,
}

/// Canonical form of a ticker: trimmed and uppercased.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

impl NewAsset {
    /// Returns a copy with a canonical symbol and a trimmed, optional name.
    pub fn normalized(&self) -> Self {
        Self {
            symbol: normalize_symbol(&self.symbol),
            name: self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            asset_type: self.asset_type,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if normalize_symbol(&self.symbol).is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        Ok(())
    }
}
