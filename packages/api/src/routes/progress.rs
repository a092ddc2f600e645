use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, error};

use crate::{
    error::ApiError, middleware::auth::AuthenticatedUser, middleware::json::ApiJson,
    state::AppState,
};
use shared::models::progress::{Progress, ProgressUpdate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/progress", get(list_progress))
        .route("/progress/{game}", get(get_progress).post(record_progress))
}

async fn list_progress(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Progress>>, ApiError> {
    state
        .progress_service
        .list_progress(&user.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to list progress for {}: {}", user.user_id, e);
            ApiError::from(e)
        })
}

async fn get_progress(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game): Path<String>,
) -> Result<Json<Progress>, ApiError> {
    state
        .progress_service
        .get_progress(&user.user_id, &game)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn record_progress(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game): Path<String>,
    ApiJson(update): ApiJson<ProgressUpdate>,
) -> Result<Json<Progress>, ApiError> {
    let progress = state
        .progress_service
        .record_progress(&user.user_id, &game, update)
        .await
        .map_err(|e| {
            error!("Failed to save progress for {} on {}: {}", user.user_id, game, e);
            ApiError::from(e)
        })?;
    debug!("Progress saved for {} on {}", user.user_id, game);
    Ok(Json(progress))
}
