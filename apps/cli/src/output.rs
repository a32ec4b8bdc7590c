//! Plain-text tables and JSON output for command results.

use anyhow::Result;
use folio_core::constants::DISPLAY_DECIMAL_PRECISION;
use folio_core::portfolio::PnlPercent;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Prints `value` as JSON, or the text from `render` otherwise.
    pub fn emit<T: Serialize>(&self, value: &T, render: impl FnOnce(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", render(value));
        }
        Ok(())
    }
}

pub fn money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    format!("{:.*}", DISPLAY_DECIMAL_PRECISION as usize, rounded)
}

pub fn optional_money(value: Option<Decimal>) -> String {
    value.map(money).unwrap_or_else(|| "-".to_string())
}

pub fn quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

pub fn percent(value: Option<PnlPercent>) -> String {
    match value {
        Some(PnlPercent::Finite(d)) => format!("{}%", money(d)),
        Some(PnlPercent::Unbounded) => PnlPercent::Unbounded.to_string(),
        None => "-".to_string(),
    }
}

/// Renders rows under `headers`. The first column is left aligned, the rest
/// right aligned.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == 0 {
                    format!("{:<width$}", cell, width = widths[i])
                } else {
                    format!("{:>width$}", cell, width = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    out.extend(
        rows.iter()
            .map(|row| line(row.iter().map(String::as_str).collect())),
    );
    out.join("\n")
}
