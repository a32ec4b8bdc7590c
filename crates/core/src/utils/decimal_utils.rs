use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::ZERO_TOLERANCE;
use crate::errors::{CalculatorError, Error, Result, ValidationError};

/// Returns the tolerance below which quantities count as zero.
pub fn zero_tolerance() -> Decimal {
    Decimal::from_str(ZERO_TOLERANCE).unwrap_or_else(|_| Decimal::new(1, 9))
}

/// True when `quantity` is strictly above the zero tolerance.
pub fn is_quantity_significant(quantity: &Decimal) -> bool {
    *quantity > zero_tolerance()
}

/// A user-supplied amount, kept as text until it is validated.
///
/// Deserializes from either a JSON string (`"1.25"`) or a JSON number
/// (`1.25`), so clients that only speak floats still reach the same decimal
/// parsing and error messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAmount", into = "String")]
pub struct AmountInput(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawAmount> for AmountInput {
    fn from(raw: RawAmount) -> Self {
        match raw {
            RawAmount::Text(s) => AmountInput(s),
            RawAmount::Number(n) => AmountInput(n.to_string()),
        }
    }
}

impl From<AmountInput> for String {
    fn from(input: AmountInput) -> Self {
        input.0
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput(value)
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        AmountInput(value.to_string())
    }
}

impl fmt::Display for AmountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AmountInput {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the amount as an exact decimal.
    ///
    /// Plain and scientific notation are accepted (`1e-3`). Anything else is a
    /// validation error naming `field`.
    pub fn parse(&self, field: &str) -> Result<Decimal> {
        let trimmed = self.0.trim();
        let invalid = || {
            Error::Validation(ValidationError::InvalidNumber {
                field: field.to_string(),
                value: self.0.clone(),
            })
        };
        if trimmed.is_empty() {
            return Err(invalid());
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| invalid())
    }
}

/// Unwraps a `checked_*` result, reporting an overflow while computing
/// `what` as a calculation error.
pub fn checked(result: Option<Decimal>, what: &str) -> Result<Decimal> {
    result.ok_or_else(|| Error::Calculation(CalculatorError::Overflow(what.to_string())))
}
