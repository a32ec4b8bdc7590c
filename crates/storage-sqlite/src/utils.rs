//! Helpers shared by the SQLite repositories.

use std::str::FromStr;

use num_traits::FromPrimitive;
use rust_decimal::Decimal;

diesel::define_sql_function! {
    /// SQLite `lower()`, used for case-insensitive lookups backed by
    /// `lower(col)` indexes.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Parses a decimal stored as TEXT.
///
/// Values written by older tools may use float notation; those go through
/// `f64` as a fallback. Unparseable values are logged and read as zero.
pub fn parse_decimal_string_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str).or_else(|_| Decimal::from_scientific(value_str)) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value_str) {
            Ok(f_val) => match Decimal::from_f64(f_val) {
                Some(dec_val) => dec_val,
                None => {
                    log::error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                        field_name,
                        value_str,
                        f_val
                    );
                    Decimal::ZERO
                }
            },
            Err(e_f64) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name, value_str, e_decimal, e_f64
                );
                Decimal::ZERO
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_plain_and_scientific() {
        assert_eq!(parse_decimal_string_tolerant("12.3400", "quantity"), dec!(12.3400));
        assert_eq!(parse_decimal_string_tolerant("1e-3", "fees"), dec!(0.001));
    }

    #[test]
    fn test_parse_decimal_garbage_is_zero() {
        assert_eq!(parse_decimal_string_tolerant("n/a", "price_per_unit"), Decimal::ZERO);
    }
}
