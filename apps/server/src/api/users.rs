use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};

async fn fetch_user_data(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let user = state.user_service.get_user_data(&username)?;
    Ok(Json(json!({ "success": true, "data": user })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/fetch-data/{username}", get(fetch_user_data))
}
