use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check endpoint to verify API status
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "games": state.catalog.len(),
    }))
}
