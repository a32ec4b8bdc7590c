use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use folio_market_data::MarketDataProvider;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::quotes_traits::QuoteServiceTrait;
use crate::assets::normalize_symbol;

struct CachedPrice {
    price: Decimal,
    fetched_at: Instant,
}

/// Price lookup over a priority-ordered provider chain.
///
/// Successful prices are cached per symbol for `cache_ttl`; a zero TTL turns
/// the cache off. Expired entries are pruned whenever a new price is stored.
pub struct QuoteService {
    providers: Vec<Arc<dyn MarketDataProvider>>,
    cache: RwLock<HashMap<String, CachedPrice>>,
    cache_ttl: Duration,
}

impl QuoteService {
    pub fn new(mut providers: Vec<Arc<dyn MarketDataProvider>>, cache_ttl: Duration) -> Self {
        providers.sort_by_key(|p| p.priority());
        Self {
            providers,
            cache: RwLock::new(HashMap::new()),
            cache_ttl,
        }
    }

    /// Provider ids in the order they are consulted.
    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    fn cached(&self, symbol: &str) -> Option<Decimal> {
        if self.cache_ttl.is_zero() {
            return None;
        }
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        cache
            .get(symbol)
            .filter(|entry| entry.fetched_at.elapsed() < self.cache_ttl)
            .map(|entry| entry.price)
    }

    fn remember(&self, symbol: &str, price: Decimal) {
        if self.cache_ttl.is_zero() {
            return;
        }
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.retain(|_, entry| entry.fetched_at.elapsed() < self.cache_ttl);
        cache.insert(
            symbol.to_string(),
            CachedPrice {
                price,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of cached entries, expired ones included until the next insert.
    pub fn cached_symbols(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Drops every cached price.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn get_current_price(&self, symbol: &str) -> Option<Decimal> {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return None;
        }
        if let Some(price) = self.cached(&symbol) {
            debug!("Price cache hit for {}: {}", symbol, price);
            return Some(price);
        }

        for provider in &self.providers {
            match provider.get_latest_quote(&symbol).await {
                Ok(quote) => {
                    debug!(
                        "Price for {} from {}: {}",
                        symbol,
                        provider.id(),
                        quote.close
                    );
                    self.remember(&symbol, quote.close);
                    return Some(quote.close);
                }
                Err(e) if e.is_symbol_not_found() => {
                    debug!("{} has no price for {}", provider.id(), symbol);
                }
                Err(e) => {
                    warn!("{} failed to price {}: {}", provider.id(), symbol, e);
                }
            }
        }

        warn!("No current price available for {}", symbol);
        None
    }
}
