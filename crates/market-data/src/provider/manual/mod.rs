//! Manual price provider.
//!
//! Serves prices from a fixed table, typically loaded from configuration as
//! `AAPL=187.50,BTC-USD=64000`. It sits in front of the network providers so
//! that a manually pinned price always wins.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "MANUAL";

/// Provider answering from an in-memory symbol → price table.
#[derive(Debug, Clone)]
pub struct ManualProvider {
    prices: HashMap<String, Decimal>,
    currency: String,
}

impl ManualProvider {
    /// Creates a provider from explicit `(symbol, price)` pairs.
    pub fn new<I, S>(prices: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        Self {
            prices: prices
                .into_iter()
                .map(|(symbol, price)| (normalize_symbol(symbol.as_ref()), price))
                .collect(),
            currency: "USD".to_string(),
        }
    }

    /// Parses a `SYMBOL=PRICE` list separated by commas.
    ///
    /// Blank entries are ignored. Prices must be non-negative decimals.
    pub fn from_price_table(table: &str) -> Result<Self, MarketDataError> {
        let mut prices = HashMap::new();
        for entry in table.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (symbol, price) = entry.split_once('=').ok_or_else(|| {
                MarketDataError::InvalidConfiguration(format!(
                    "Expected SYMBOL=PRICE, got '{}'",
                    entry
                ))
            })?;
            let symbol = normalize_symbol(symbol);
            if symbol.is_empty() {
                return Err(MarketDataError::InvalidConfiguration(format!(
                    "Missing symbol in '{}'",
                    entry
                )));
            }
            let price = Decimal::from_str(price.trim()).map_err(|e| {
                MarketDataError::InvalidConfiguration(format!(
                    "Invalid price for {}: {}",
                    symbol, e
                ))
            })?;
            if price.is_sign_negative() {
                return Err(MarketDataError::InvalidConfiguration(format!(
                    "Price for {} cannot be negative",
                    symbol
                )));
            }
            prices.insert(symbol, price);
        }
        Ok(Self {
            prices,
            currency: "USD".to_string(),
        })
    }

    /// Sets or replaces the price for a symbol.
    pub fn set_price(&mut self, symbol: &str, price: Decimal) {
        self.prices.insert(normalize_symbol(symbol), price);
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }
}

impl Default for ManualProvider {
    fn default() -> Self {
        Self::new(std::iter::empty::<(&str, Decimal)>())
    }
}

fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[async_trait]
impl MarketDataProvider for ManualProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        0
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let key = normalize_symbol(symbol);
        match self.prices.get(&key) {
            Some(price) => {
                debug!("Manual price for {}: {}", key, price);
                Ok(Quote::new(
                    key,
                    Utc::now(),
                    *price,
                    self.currency.clone(),
                    PROVIDER_ID,
                ))
            }
            None => Err(MarketDataError::SymbolNotFound(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_price_table_parses_entries() {
        let provider = ManualProvider::from_price_table(" aapl=187.50, BTC-USD = 64000 ,,").unwrap();
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.prices.get("AAPL"), Some(&dec!(187.50)));
        assert_eq!(provider.prices.get("BTC-USD"), Some(&dec!(64000)));
    }

    #[test]
    fn test_from_price_table_empty_is_ok() {
        let provider = ManualProvider::from_price_table("").unwrap();
        assert!(provider.is_empty());
    }

    #[test]
    fn test_from_price_table_rejects_malformed_entries() {
        assert!(matches!(
            ManualProvider::from_price_table("AAPL"),
            Err(MarketDataError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            ManualProvider::from_price_table("=10"),
            Err(MarketDataError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            ManualProvider::from_price_table("AAPL=abc"),
            Err(MarketDataError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            ManualProvider::from_price_table("AAPL=-1"),
            Err(MarketDataError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn test_get_latest_quote_is_case_insensitive() {
        let provider = ManualProvider::new([("msft", dec!(410.1))]);
        let quote = provider.get_latest_quote(" MSFT ").await.unwrap();
        assert_eq!(quote.close, dec!(410.1));
        assert_eq!(quote.source, "MANUAL");
        assert_eq!(quote.symbol, "MSFT");
    }

    #[tokio::test]
    async fn test_get_latest_quote_unknown_symbol() {
        let provider = ManualProvider::default();
        let err = provider.get_latest_quote("NOPE").await.unwrap_err();
        assert!(err.is_symbol_not_found());
    }

    #[test]
    fn test_priority_beats_network_providers() {
        assert_eq!(ManualProvider::default().priority(), 0);
    }
}
