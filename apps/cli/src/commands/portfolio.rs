use anyhow::Result;
use folio_core::portfolio::{PerformanceServiceTrait, PortfolioPerformance, RealizedGainsReport};
use folio_core::users::User;
use folio_core::utils::time_utils::parse_date_opt;

use crate::context::Context;
use crate::output::{self, Output};

pub async fn performance(ctx: &Context, out: &Output, user: &User) -> Result<()> {
    let service = ctx.performance_service().await?;
    let performance = service.get_portfolio_performance(&user.id).await?;
    out.emit(&performance, render_performance)
}

pub fn realized(
    ctx: &Context,
    out: &Output,
    user: &User,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<()> {
    let start_date = parse_date_opt(start)?;
    let end_date = parse_date_opt(end)?;
    let service = ctx.realized_gains_service();
    let report = service.get_realized_gains(&user.id, start_date, end_date)?;
    out.emit(&report, render_realized)
}

fn render_performance(perf: &PortfolioPerformance) -> String {
    let mut sections = Vec::new();

    if perf.positions.is_empty() {
        sections.push("No open positions.".to_string());
    } else {
        let rows: Vec<Vec<String>> = perf
            .positions
            .iter()
            .map(|(symbol, p)| {
                vec![
                    symbol.clone(),
                    output::quantity(p.quantity),
                    output::money(p.average_cost_basis),
                    output::money(p.total_cost_basis),
                    output::optional_money(p.current_price),
                    output::optional_money(p.market_value),
                    output::optional_money(p.unrealized_pnl),
                    output::percent(p.unrealized_pnl_percent),
                    output::money(p.realized_pnl),
                ]
            })
            .collect();
        sections.push(output::table(
            &[
                "SYMBOL",
                "QTY",
                "AVG COST",
                "COST BASIS",
                "PRICE",
                "MARKET VALUE",
                "UNREALIZED",
                "UNREALIZED %",
                "REALIZED",
            ],
            &rows,
        ));
    }

    sections.push(format!(
        "Total cost basis:     {}\nTotal market value:   {}\nTotal unrealized P&L: {}\nTotal realized P&L:   {}",
        output::money(perf.total_cost_basis),
        output::money(perf.total_market_value),
        output::money(perf.total_unrealized_pnl),
        output::money(perf.total_realized_pnl),
    ));

    if !perf.unpriced_symbols.is_empty() {
        sections.push(format!(
            "No current price for: {}",
            perf.unpriced_symbols.join(", ")
        ));
    }
    sections.join("\n\n")
}

fn render_realized(report: &RealizedGainsReport) -> String {
    if report.gains.is_empty() {
        return "No realized gains in range.".to_string();
    }
    let rows: Vec<Vec<String>> = report
        .gains
        .iter()
        .map(|g| {
            vec![
                g.date.format("%Y-%m-%d").to_string(),
                g.symbol.clone(),
                output::quantity(g.quantity),
                output::money(g.proceeds),
                output::money(g.cost_basis),
                output::money(g.realized_pnl),
            ]
        })
        .collect();
    format!(
        "{}\n\nTotal realized P&L: {}",
        output::table(
            &["DATE", "SYMBOL", "QTY", "PROCEEDS", "COST BASIS", "REALIZED"],
            &rows
        ),
        output::money(report.total_realized_pnl)
    )
}
