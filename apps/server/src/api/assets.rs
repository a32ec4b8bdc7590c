use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use folio_core::{
    assets::{Asset, NewAsset},
    transactions::Transaction,
};

use crate::{
    api::ListQuery,
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

async fn list_assets(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(q): Query<ListQuery>,
) -> ApiResult<Json<Vec<Asset>>> {
    let assets = state.asset_service.list_assets(&user.id, q.skip, q.limit)?;
    Ok(Json(assets))
}

async fn create_asset(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewAsset>,
) -> ApiResult<(StatusCode, Json<Asset>)> {
    let asset = state.asset_service.create_asset(&user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

async fn get_asset(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Asset>> {
    state
        .asset_service
        .get_asset(&id, &user.id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Asset {id}")))
}

async fn delete_asset(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.asset_service.delete_asset(&id, &user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Asset {id}")))
    }
}

async fn list_asset_transactions(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state
        .transaction_service
        .list_transactions_for_asset(&id, &user.id)?;
    Ok(Json(transactions))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets", get(list_assets).post(create_asset))
        .route("/assets/{id}", get(get_asset).delete(delete_asset))
        .route("/assets/{id}/transactions", get(list_asset_transactions))
}
