use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, error};

use crate::{
    error::ApiError, middleware::auth::AuthenticatedUser, middleware::json::ApiJson,
    state::AppState,
};
use shared::models::score::{LeaderboardEntry, Score, SubmitScoreRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/scores/leaderboard/{game}", get(leaderboard))
        .route("/scores/user/{game}", get(user_scores))
        .route("/scores/{game}", post(submit_score))
}

async fn leaderboard(
    State(state): State<AppState>,
    Path(game): Path<String>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    state
        .score_service
        .leaderboard(&game)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to load leaderboard for {}: {}", game, e);
            ApiError::from(e)
        })
}

async fn submit_score(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game): Path<String>,
    ApiJson(request): ApiJson<SubmitScoreRequest>,
) -> Result<(StatusCode, Json<Score>), ApiError> {
    let player = state.user_service.get_user_by_id(&user.user_id).await?;
    let score = state
        .score_service
        .submit_score(&player.id, &player.username, &game, request.score, request.details)
        .await
        .map_err(|e| {
            error!("Failed to save score for {} on {}: {}", player.id, game, e);
            ApiError::from(e)
        })?;
    debug!("Score {} saved for {} on {}", score.score, player.id, score.game);
    Ok((StatusCode::CREATED, Json(score)))
}

async fn user_scores(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(game): Path<String>,
) -> Result<Json<Vec<Score>>, ApiError> {
    state
        .score_service
        .user_scores(&user.user_id, &game)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to load scores for {} on {}: {}", user.user_id, game, e);
            ApiError::from(e)
        })
}
