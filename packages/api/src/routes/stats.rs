use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::stats::UserStats;

pub fn routes() -> Router<AppState> {
    Router::new().route("/stats/user/{user_id}", get(user_stats))
}

async fn user_stats(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> Result<Json<UserStats>, ApiError> {
    let stats = state.stats_service.user_stats(&user_id).await?;
    Ok(Json(stats))
}
