//! Transaction domain models and amount validation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::utils::decimal_utils::{is_quantity_significant, AmountInput};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl TryFrom<String> for TransactionType {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// A recorded trade. Amounts are exact decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub owner_id: String,
    pub asset_id: String,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub price_per_unit: Decimal,
    pub fees: Decimal,
    pub transaction_date: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a trade.
///
/// Amounts stay raw until [`validate_amounts`] runs. A missing date means
/// "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub asset_id: String,
    pub transaction_type: TransactionType,
    pub quantity: AmountInput,
    pub price_per_unit: AmountInput,
    #[serde(default)]
    pub fees: Option<AmountInput>,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update of a trade; absent fields keep their stored value.
///
/// `notes: Some("")` clears the notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub quantity: Option<AmountInput>,
    #[serde(default)]
    pub price_per_unit: Option<AmountInput>,
    #[serde(default)]
    pub fees: Option<AmountInput>,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.asset_id.is_none()
            && self.transaction_type.is_none()
            && self.quantity.is_none()
            && self.price_per_unit.is_none()
            && self.fees.is_none()
            && self.transaction_date.is_none()
            && self.notes.is_none()
    }
}

/// Amounts that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedAmounts {
    pub quantity: Decimal,
    pub price_per_unit: Decimal,
    pub fees: Decimal,
}

/// Parses and checks trade amounts.
///
/// Quantity must be above the zero tolerance; price and fees must not be
/// negative. Missing fees count as zero. The trade's total and per-unit cost
/// must fit in a `Decimal`.
pub fn validate_amounts(
    quantity: &AmountInput,
    price_per_unit: &AmountInput,
    fees: Option<&AmountInput>,
) -> Result<ValidatedAmounts> {
    let quantity = quantity.parse("quantity")?;
    let price_per_unit = price_per_unit.parse("price_per_unit")?;
    let fees = match fees {
        Some(f) => f.parse("fees")?,
        None => Decimal::ZERO,
    };

    if !is_quantity_significant(&quantity) {
        return Err(Error::invalid_input("Quantity must be positive"));
    }
    if price_per_unit < Decimal::ZERO {
        return Err(Error::invalid_input("Price per unit cannot be negative"));
    }
    if fees < Decimal::ZERO {
        return Err(Error::invalid_input("Fees cannot be negative"));
    }
    let fits = quantity
        .checked_mul(price_per_unit)
        .and_then(|gross| gross.checked_add(fees))
        .and_then(|total| total.checked_div(quantity))
        .is_some();
    if !fits {
        return Err(Error::invalid_input("Trade amount is too large"));
    }

    Ok(ValidatedAmounts {
        quantity,
        price_per_unit,
        fees,
    })
}

/// Trims notes; blank notes become `None`.
pub fn normalize_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
