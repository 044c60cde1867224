use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde_json::{json, Value};
use spendly_core::goals::{GoalInput, GoalTitleInput};

use crate::{
    auth::Session,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

async fn get_goals(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let goals = state.goal_service.get_goals(&username).await?;
    Ok(Json(json!({ "success": true, "goals": goals })))
}

async fn create_goal(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    payload: Result<Json<GoalInput>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(input) = payload?;
    tracing::debug!("{} creating goal for {}", session.username, username);
    let goal = state.goal_service.create_goal(&username, input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Goal created",
        "goal": goal,
    })))
}

async fn update_goal(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    payload: Result<Json<GoalInput>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(input) = payload?;
    tracing::debug!("{} updating goal for {}", session.username, username);
    let goal = state.goal_service.update_goal(&username, input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Goal updated successfully",
        "goal": goal,
    })))
}

async fn delete_goal(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    payload: Result<Json<GoalTitleInput>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(input) = payload?;
    let title = input.title()?;
    tracing::debug!("{} removing goal {} for {}", session.username, title, username);
    state.goal_service.delete_goal(&username, &title).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Goal removed successfully",
    })))
}

async fn get_goal_history(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let history = state.goal_service.get_goal_history(&username)?;
    Ok(Json(json!({ "success": true, "data": history })))
}

async fn get_goals_at_version(
    Path((username, version)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let version: usize = version
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid snapshot version: {version}")))?;
    let goals = state
        .goal_service
        .get_goals_at_version(&username, version)
        .await?;
    Ok(Json(json!({ "success": true, "goals": goals })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/goals/{username}",
            get(get_goals)
                .post(create_goal)
                .patch(update_goal)
                .delete(delete_goal),
        )
        .route("/goals/{username}/history", get(get_goal_history))
        .route(
            "/goals/{username}/versions/{version}",
            get(get_goals_at_version),
        )
}
