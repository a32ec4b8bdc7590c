use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use folio_core::transactions::{NewTransaction, Transaction, TransactionUpdate};

use crate::{
    api::ListQuery,
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(q): Query<ListQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state
        .transaction_service
        .list_transactions(&user.id, q.skip, q.limit)?;
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let transaction = state
        .transaction_service
        .create_transaction(&user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Transaction>> {
    state
        .transaction_service
        .get_transaction(&id, &user.id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Transaction {id}")))
}

async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionUpdate>,
) -> ApiResult<Json<Transaction>> {
    state
        .transaction_service
        .update_transaction(&id, &user.id, payload)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Transaction {id}")))
}

async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state
        .transaction_service
        .delete_transaction(&id, &user.id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Transaction {id}")))
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
