use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_transactions(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let transactions = state
        .transaction_service
        .get_transactions(&username)
        .await?;
    Ok(Json(json!({ "success": true, "data": transactions })))
}

/// Expiring retrieval link for the transaction snapshot, so clients can
/// download it from the gateway directly.
async fn get_transactions_link(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let link = state
        .transaction_service
        .get_transactions_link(&username)
        .await?;
    Ok(Json(json!({ "success": true, "data": link })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactions/{username}", get(get_transactions))
        .route("/transactions/{username}/link", get(get_transactions_link))
}
