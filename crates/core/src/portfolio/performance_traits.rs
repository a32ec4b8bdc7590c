use async_trait::async_trait;
use chrono::NaiveDate;

use super::performance_model::{PortfolioPerformance, RealizedGainsReport};
use crate::errors::Result;

#[async_trait]
pub trait PerformanceServiceTrait: Send + Sync {
    /// Values every open position of the user at current prices.
    async fn get_portfolio_performance(&self, user_id: &str) -> Result<PortfolioPerformance>;

    /// Sells dated within `[start_date, end_date]`, either bound optional.
    fn get_realized_gains(
        &self,
        user_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<RealizedGainsReport>;
}
