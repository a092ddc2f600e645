use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{error::ApiError, state::AppState};
use ::games::catalog::{GameEntry, GameSummary};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(list_games))
        .route("/games/{game_id}", get(get_game))
}

async fn list_games(State(state): State<AppState>) -> Json<Vec<GameSummary>> {
    Json(state.catalog.summaries())
}

async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameEntry>, ApiError> {
    state
        .catalog
        .get(&game_id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::GameNotFound(game_id))
}
