use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;

use super::performance_model::{PortfolioPerformance, RealizedGain, RealizedGainsReport};
use super::performance_traits::PerformanceServiceTrait;
use super::valuator::{replay, value};
use crate::assets::AssetServiceTrait;
use crate::errors::{Error, Result};
use crate::quotes::QuoteServiceTrait;
use crate::transactions::TransactionServiceTrait;
use crate::utils::decimal_utils::{checked, is_quantity_significant};

/// `total += amount`, failing instead of overflowing.
fn accumulate(total: &mut Decimal, amount: Decimal, what: &str) -> Result<()> {
    *total = checked(total.checked_add(amount), what)?;
    Ok(())
}

/// Computes portfolio metrics from stored trades and live prices.
pub struct PerformanceService {
    asset_service: Arc<dyn AssetServiceTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
}

impl PerformanceService {
    pub fn new(
        asset_service: Arc<dyn AssetServiceTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
    ) -> Self {
        Self {
            asset_service,
            transaction_service,
            quote_service,
        }
    }
}

#[async_trait]
impl PerformanceServiceTrait for PerformanceService {
    async fn get_portfolio_performance(&self, user_id: &str) -> Result<PortfolioPerformance> {
        info!("Calculating portfolio performance for user {}", user_id);
        let assets = self.asset_service.list_all_assets(user_id)?;
        let mut performance = PortfolioPerformance::default();

        for asset in &assets {
            let transactions = self
                .transaction_service
                .list_transactions_for_asset(&asset.id, user_id)?;
            if transactions.is_empty() {
                debug!("No transactions for {}, skipping", asset.symbol);
                continue;
            }

            let position = replay(&asset.id, &transactions)?;
            accumulate(
                &mut performance.total_realized_pnl,
                position.realized_pnl,
                "total realized P&L",
            )?;

            // Closed positions need no quote.
            let price = if is_quantity_significant(&position.quantity) {
                self.quote_service.get_current_price(&asset.symbol).await
            } else {
                None
            };
            let Some(asset_perf) = value(asset, &position, price)? else {
                continue;
            };

            accumulate(
                &mut performance.total_cost_basis,
                asset_perf.total_cost_basis,
                "total cost basis",
            )?;
            match (asset_perf.market_value, asset_perf.unrealized_pnl) {
                (Some(mv), Some(pnl)) => {
                    accumulate(&mut performance.total_market_value, mv, "total market value")?;
                    accumulate(
                        &mut performance.total_unrealized_pnl,
                        pnl,
                        "total unrealized P&L",
                    )?;
                }
                _ => performance.unpriced_symbols.push(asset.symbol.clone()),
            }
            performance
                .positions
                .insert(asset.symbol.clone(), asset_perf);
        }

        info!(
            "Portfolio performance for user {} done: {} open positions",
            user_id,
            performance.positions.len()
        );
        Ok(performance)
    }

    fn get_realized_gains(
        &self,
        user_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<RealizedGainsReport> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(Error::invalid_input(format!(
                    "Start date {} is after end date {}",
                    start, end
                )));
            }
        }

        let in_range = |date: NaiveDate| {
            start_date.is_none_or(|start| date >= start) && end_date.is_none_or(|end| date <= end)
        };

        let mut gains = Vec::new();
        for asset in self.asset_service.list_all_assets(user_id)? {
            let transactions = self
                .transaction_service
                .list_transactions_for_asset(&asset.id, user_id)?;
            if transactions.is_empty() {
                continue;
            }

            // Full history so the lots are right when the window opens.
            let position = replay(&asset.id, &transactions)?;
            gains.extend(
                position
                    .sales
                    .into_iter()
                    .filter(|sale| in_range(sale.date.date()))
                    .map(|sale| RealizedGain {
                        transaction_id: sale.transaction_id,
                        asset_id: asset.id.clone(),
                        symbol: asset.symbol.clone(),
                        date: sale.date,
                        quantity: sale.quantity,
                        proceeds: sale.proceeds,
                        cost_basis: sale.cost_basis,
                        realized_pnl: sale.realized_pnl,
                    }),
            );
        }

        gains.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.transaction_id.cmp(&b.transaction_id))
        });
        let mut total_realized_pnl = Decimal::ZERO;
        for gain in &gains {
            accumulate(&mut total_realized_pnl, gain.realized_pnl, "total realized P&L")?;
        }

        Ok(RealizedGainsReport {
            start_date,
            end_date,
            gains,
            total_realized_pnl,
        })
    }
}
