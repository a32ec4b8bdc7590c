use std::str::FromStr;
use std::sync::Arc;

use folio_market_data::{ManualProvider, MarketDataProvider, YahooProvider};
use log::info;

use crate::errors::{Error, Result};

/// Quote providers that can be enabled by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Manual,
    Yahoo,
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(ProviderKind::Manual),
            "yahoo" => Ok(ProviderKind::Yahoo),
            other => Err(Error::invalid_input(format!(
                "Unknown quote provider '{}'. Expected 'manual' or 'yahoo'",
                other
            ))),
        }
    }
}

impl ProviderKind {
    /// Parses a comma-separated provider list, skipping blanks and repeats.
    pub fn parse_list(value: &str) -> Result<Vec<ProviderKind>> {
        let mut kinds = Vec::new();
        for part in value.split(',').filter(|p| !p.trim().is_empty()) {
            let kind = ProviderKind::from_str(part)?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }
}

/// Instantiates the enabled providers.
///
/// `manual_prices` is a `SYMBOL=PRICE,...` table for the manual provider.
pub async fn build_providers(
    kinds: &[ProviderKind],
    manual_prices: &str,
) -> Result<Vec<Arc<dyn MarketDataProvider>>> {
    let mut providers: Vec<Arc<dyn MarketDataProvider>> = Vec::with_capacity(kinds.len());
    for kind in kinds {
        match kind {
            ProviderKind::Manual => {
                let manual = ManualProvider::from_price_table(manual_prices)?;
                info!("Manual quote provider loaded with {} prices", manual.len());
                providers.push(Arc::new(manual));
            }
            ProviderKind::Yahoo => {
                providers.push(Arc::new(YahooProvider::new().await?));
                info!("Yahoo quote provider initialized");
            }
        }
    }
    Ok(providers)
}
