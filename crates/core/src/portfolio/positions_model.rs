//! Position state built while replaying an asset's trades.

use chrono::NaiveDateTime;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::errors::Result;
use crate::utils::decimal_utils::{checked, zero_tolerance};

/// An open purchase lot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    /// The BUY that opened the lot.
    pub transaction_id: String,
    pub acquisition_date: NaiveDateTime,
    pub quantity: Decimal,
    /// Purchase price per unit with the buy's fees spread over the units.
    pub unit_cost: Decimal,
}

/// Outcome of one SELL during replay.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub transaction_id: String,
    pub date: NaiveDateTime,
    /// Units actually relieved, after clamping to the held quantity.
    pub quantity: Decimal,
    /// Recorded quantity × price − fees.
    pub proceeds: Decimal,
    /// FIFO cost of the relieved units.
    pub cost_basis: Decimal,
    pub realized_pnl: Decimal,
}

/// Running state of one asset.
///
/// `quantity` and `total_investment` are tracked incrementally, not summed
/// from the lots; the open lots agree with `quantity` within the zero
/// tolerance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PositionState {
    pub asset_id: String,
    pub quantity: Decimal,
    pub total_investment: Decimal,
    pub lots: VecDeque<Lot>,
    pub realized_pnl: Decimal,
    pub sales: Vec<SaleRecord>,
}

impl PositionState {
    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            quantity: Decimal::ZERO,
            total_investment: Decimal::ZERO,
            lots: VecDeque::new(),
            realized_pnl: Decimal::ZERO,
            sales: Vec::new(),
        }
    }

    /// Sum of the open lots' quantities; `None` on overflow.
    pub fn open_lot_quantity(&self) -> Option<Decimal> {
        self.lots
            .iter()
            .try_fold(Decimal::ZERO, |acc, lot| acc.checked_add(lot.quantity))
    }

    /// Opens a lot for a BUY and returns its total cost (fees included).
    ///
    /// On overflow the state is left unchanged.
    pub fn add_lot(
        &mut self,
        transaction_id: &str,
        acquisition_date: NaiveDateTime,
        quantity: Decimal,
        price: Decimal,
        fees: Decimal,
    ) -> Result<Decimal> {
        let gross = checked(quantity.checked_mul(price), "lot cost")?;
        let lot_cost = checked(gross.checked_add(fees), "lot cost")?;
        let unit_cost = if quantity > zero_tolerance() {
            checked(lot_cost.checked_div(quantity), "unit cost")?
        } else {
            Decimal::ZERO
        };
        let held = checked(self.quantity.checked_add(quantity), "held quantity")?;
        let invested = checked(
            self.total_investment.checked_add(lot_cost),
            "total investment",
        )?;

        self.lots.push_back(Lot {
            transaction_id: transaction_id.to_string(),
            acquisition_date,
            quantity,
            unit_cost,
        });
        self.quantity = held;
        self.total_investment = invested;

        debug!(
            "BUY {} of {} at {} (lot cost {}). Held {}, invested {}",
            quantity, self.asset_id, price, lot_cost, self.quantity, self.total_investment
        );
        Ok(lot_cost)
    }

    /// Relieves `requested` units oldest-lot-first.
    ///
    /// A request above the held quantity is clamped to it. Returns the units
    /// actually relieved and their cost basis.
    pub fn reduce_lots_fifo(&mut self, requested: Decimal) -> Result<(Decimal, Decimal)> {
        let tolerance = zero_tolerance();

        let mut to_sell = requested;
        if to_sell > self.quantity {
            if to_sell - self.quantity > tolerance {
                warn!(
                    "Sell of {} {} exceeds held quantity {}. Clamping to held quantity.",
                    requested, self.asset_id, self.quantity
                );
            }
            to_sell = self.quantity.max(Decimal::ZERO);
        }

        // Work on a copy so an overflow leaves the lots untouched.
        let mut lots: Vec<Lot> = self.lots.iter().cloned().collect();
        lots.sort_by_key(|lot| lot.acquisition_date);

        let mut remaining = to_sell;
        let mut cost_basis = Decimal::ZERO;
        let mut kept = VecDeque::with_capacity(lots.len());

        for mut lot in lots {
            if remaining <= tolerance {
                kept.push_back(lot);
                continue;
            }

            let taken = remaining.min(lot.quantity);
            let lot_basis = checked(taken.checked_mul(lot.unit_cost), "sold cost basis")?;
            cost_basis = checked(cost_basis.checked_add(lot_basis), "sold cost basis")?;
            remaining -= taken;

            if lot.quantity - taken > tolerance {
                lot.quantity -= taken;
                debug!(
                    "  sold {} from lot {} ({} left)",
                    taken, lot.transaction_id, lot.quantity
                );
                kept.push_back(lot);
            } else {
                debug!("  sold {} (all) from lot {}", taken, lot.transaction_id);
            }
        }

        self.lots = kept;
        self.quantity -= to_sell;
        self.total_investment -= cost_basis;
        Ok((to_sell, cost_basis))
    }

    /// Applies a SELL: relieves lots and books the realized P&L.
    ///
    /// Proceeds use the recorded quantity even when the relief is clamped.
    pub fn record_sale(
        &mut self,
        transaction_id: &str,
        date: NaiveDateTime,
        quantity: Decimal,
        price: Decimal,
        fees: Decimal,
    ) -> Result<()> {
        let gross = checked(quantity.checked_mul(price), "sale proceeds")?;
        let proceeds = checked(gross.checked_sub(fees), "sale proceeds")?;
        let (sold, cost_basis) = self.reduce_lots_fifo(quantity)?;
        let realized_pnl = checked(proceeds.checked_sub(cost_basis), "realized P&L")?;
        self.realized_pnl = checked(self.realized_pnl.checked_add(realized_pnl), "realized P&L")?;

        debug!(
            "SELL {} of {} at {}: proceeds {}, cost basis {}, realized {}",
            sold, self.asset_id, price, proceeds, cost_basis, realized_pnl
        );

        self.sales.push(SaleRecord {
            transaction_id: transaction_id.to_string(),
            date,
            quantity: sold,
            proceeds,
            cost_basis,
            realized_pnl,
        });
        Ok(())
    }
}
