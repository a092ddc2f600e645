use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod games;
pub mod health;
pub mod progress;
pub mod scores;
pub mod stats;

/// Everything served under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(progress::routes())
        .merge(scores::routes())
        .merge(stats::routes())
        .merge(games::routes())
}
