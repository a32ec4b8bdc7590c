use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use folio_core::{
    portfolio::{PortfolioPerformance, RealizedGainsReport},
    utils::time_utils::parse_date_opt,
};
use serde::Deserialize;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RealizedGainsQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

async fn get_performance(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<PortfolioPerformance>> {
    let performance = state
        .performance_service
        .get_portfolio_performance(&user.id)
        .await?;
    Ok(Json(performance))
}

async fn get_realized_gains(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(q): Query<RealizedGainsQuery>,
) -> ApiResult<Json<RealizedGainsReport>> {
    let start = parse_date_opt(q.start_date.as_deref())?;
    let end = parse_date_opt(q.end_date.as_deref())?;
    let report = state
        .performance_service
        .get_realized_gains(&user.id, start, end)?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio/performance", get(get_performance))
        .route("/portfolio/realized-gains", get(get_realized_gains))
}
