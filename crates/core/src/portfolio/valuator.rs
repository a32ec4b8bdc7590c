//! FIFO lot replay and position valuation.
//!
//! `replay` is pure: the same trades always give the same state. `value`
//! turns a replayed state and an optional current price into the reported
//! metrics.

use log::{info, warn};
use rust_decimal::Decimal;

use super::performance_model::{AssetPerformance, PnlPercent};
use super::positions_model::PositionState;
use crate::assets::Asset;
use crate::errors::Result;
use crate::transactions::{Transaction, TransactionType};
use crate::utils::decimal_utils::{checked, zero_tolerance};

/// Replays `transactions` in date order, ties broken by id.
///
/// Fails with `Error::Calculation` when a running figure overflows.
pub fn replay(asset_id: &str, transactions: &[Transaction]) -> Result<PositionState> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by(|a, b| {
        a.transaction_date
            .cmp(&b.transaction_date)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut state = PositionState::new(asset_id);
    for tx in ordered {
        match tx.transaction_type {
            TransactionType::Buy => {
                state.add_lot(
                    &tx.id,
                    tx.transaction_date,
                    tx.quantity,
                    tx.price_per_unit,
                    tx.fees,
                )?;
            }
            TransactionType::Sell => state.record_sale(
                &tx.id,
                tx.transaction_date,
                tx.quantity,
                tx.price_per_unit,
                tx.fees,
            )?,
        }
    }
    Ok(state)
}

/// Values an open position against `price`.
///
/// Returns `None` when the position is closed (quantity within tolerance of
/// zero or below).
pub fn value(
    asset: &Asset,
    position: &PositionState,
    price: Option<Decimal>,
) -> Result<Option<AssetPerformance>> {
    let tolerance = zero_tolerance();
    if position.quantity <= tolerance {
        info!(
            "Position in {} is closed ({}); not reported as open",
            asset.symbol, position.quantity
        );
        return Ok(None);
    }

    let total_cost_basis = position.total_investment;
    let average_cost_basis = checked(
        total_cost_basis.checked_div(position.quantity),
        "average cost basis",
    )?;

    let (market_value, unrealized_pnl, unrealized_pnl_percent) = match price {
        Some(price) => {
            let market_value = checked(position.quantity.checked_mul(price), "market value")?;
            let unrealized_pnl = checked(
                market_value.checked_sub(total_cost_basis),
                "unrealized P&L",
            )?;
            let percent = if total_cost_basis > tolerance {
                let ratio = checked(
                    unrealized_pnl.checked_div(total_cost_basis),
                    "unrealized P&L %",
                )?;
                PnlPercent::Finite(checked(
                    ratio.checked_mul(Decimal::ONE_HUNDRED),
                    "unrealized P&L %",
                )?)
            } else if market_value > tolerance {
                warn!(
                    "Cost basis of {} is {} with market value {}; P&L % is unbounded",
                    asset.symbol, total_cost_basis, market_value
                );
                PnlPercent::Unbounded
            } else {
                PnlPercent::Finite(Decimal::ZERO)
            };
            (Some(market_value), Some(unrealized_pnl), Some(percent))
        }
        None => {
            warn!(
                "No current price for {}; market value and P&L not computed",
                asset.symbol
            );
            (None, None, None)
        }
    };

    Ok(Some(AssetPerformance {
        asset: asset.clone(),
        quantity: position.quantity,
        average_cost_basis,
        total_cost_basis,
        current_price: price,
        market_value,
        unrealized_pnl,
        unrealized_pnl_percent,
        realized_pnl: position.realized_pnl,
    }))
}
