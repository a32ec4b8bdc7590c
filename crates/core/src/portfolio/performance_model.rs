//! Valuation output models.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::Asset;

/// Unrealized P&L as a percentage of cost basis.
///
/// `Unbounded` covers a position with no cost basis but a positive market
/// value. It serializes as the string `"Infinity"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PnlPercentRepr", try_from = "PnlPercentRepr")]
pub enum PnlPercent {
    Finite(Decimal),
    Unbounded,
}

const UNBOUNDED_LABEL: &str = "Infinity";

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PnlPercentRepr {
    Number(Decimal),
    Text(String),
}

impl From<PnlPercent> for PnlPercentRepr {
    fn from(value: PnlPercent) -> Self {
        match value {
            PnlPercent::Finite(d) => PnlPercentRepr::Number(d),
            PnlPercent::Unbounded => PnlPercentRepr::Text(UNBOUNDED_LABEL.to_string()),
        }
    }
}

impl TryFrom<PnlPercentRepr> for PnlPercent {
    type Error = String;

    fn try_from(value: PnlPercentRepr) -> Result<Self, Self::Error> {
        match value {
            PnlPercentRepr::Number(d) => Ok(PnlPercent::Finite(d)),
            PnlPercentRepr::Text(s) if s.eq_ignore_ascii_case(UNBOUNDED_LABEL) => {
                Ok(PnlPercent::Unbounded)
            }
            PnlPercentRepr::Text(s) => Err(format!("Invalid P&L percentage: {}", s)),
        }
    }
}

impl PnlPercent {
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            PnlPercent::Finite(d) => Some(*d),
            PnlPercent::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, PnlPercent::Unbounded)
    }
}

impl fmt::Display for PnlPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PnlPercent::Finite(d) => write!(f, "{}", d),
            PnlPercent::Unbounded => f.write_str(UNBOUNDED_LABEL),
        }
    }
}

/// Valuation of one open position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPerformance {
    pub asset: Asset,
    pub quantity: Decimal,
    pub average_cost_basis: Decimal,
    pub total_cost_basis: Decimal,
    pub current_price: Option<Decimal>,
    pub market_value: Option<Decimal>,
    pub unrealized_pnl: Option<Decimal>,
    pub unrealized_pnl_percent: Option<PnlPercent>,
    /// P&L booked by past sells of this asset.
    pub realized_pnl: Decimal,
}

/// A user's open positions keyed by symbol, with portfolio totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformance {
    pub positions: BTreeMap<String, AssetPerformance>,
    pub total_cost_basis: Decimal,
    /// Market value of the priced positions only.
    pub total_market_value: Decimal,
    /// Unrealized P&L of the priced positions only.
    pub total_unrealized_pnl: Decimal,
    /// Realized P&L across all assets, closed positions included.
    pub total_realized_pnl: Decimal,
    pub unpriced_symbols: Vec<String>,
}

/// One SELL with its FIFO-realized result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedGain {
    pub transaction_id: String,
    pub asset_id: String,
    pub symbol: String,
    pub date: NaiveDateTime,
    pub quantity: Decimal,
    pub proceeds: Decimal,
    pub cost_basis: Decimal,
    pub realized_pnl: Decimal,
}

/// Sells within an inclusive date window, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedGainsReport {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub gains: Vec<RealizedGain>,
    pub total_realized_pnl: Decimal,
}
