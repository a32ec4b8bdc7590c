use async_trait::async_trait;
use rust_decimal::Decimal;

/// Source of current prices for valuation.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Latest price of `symbol`, or `None` when no provider could supply one.
    ///
    /// Provider failures are logged, never returned.
    async fn get_current_price(&self, symbol: &str) -> Option<Decimal>;
}
