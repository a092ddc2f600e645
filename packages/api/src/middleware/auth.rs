use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use crate::{error::ApiError, state::AppState};

pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// `x-auth-token` first, then `Authorization: Bearer <token>`.
fn token_from_parts(parts: &Parts) -> Result<&str, ApiError> {
    if let Some(value) = parts.headers.get(AUTH_TOKEN_HEADER) {
        return value
            .to_str()
            .map(str::trim)
            .map_err(|_| ApiError::Unauthorized("Invalid header format".to_string()));
    }

    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("No token, authorization denied".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid header format".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| ApiError::Unauthorized("No token, authorization denied".to_string()))
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_parts(parts)?;
        if token.is_empty() {
            return Err(ApiError::Unauthorized(
                "No token, authorization denied".to_string(),
            ));
        }

        let user_id = state
            .auth_service
            .extract_user_id_from_token(token)
            .map_err(|e| {
                debug!("Rejected token: {}", e);
                ApiError::from(e)
            })?;

        Ok(AuthenticatedUser { user_id })
    }
}
