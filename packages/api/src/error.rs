use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::services::errors::{
    auth_service_errors::AuthServiceError, progress_service_errors::ProgressServiceError,
    score_service_errors::ScoreServiceError, stats_service_errors::StatsServiceError,
    user_service_errors::UserServiceError,
};
use tracing::error;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub msg: String,
}

#[derive(Debug)]
pub enum ApiError {
    UserService(UserServiceError),
    AuthService(AuthServiceError),
    ScoreService(ScoreServiceError),
    ProgressService(ProgressServiceError),
    StatsService(StatsServiceError),
    GameNotFound(String),
    BadRequest(String),
    Unauthorized(String),
}

impl From<UserServiceError> for ApiError {
    fn from(error: UserServiceError) -> Self {
        ApiError::UserService(error)
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        ApiError::AuthService(error)
    }
}

impl From<ScoreServiceError> for ApiError {
    fn from(error: ScoreServiceError) -> Self {
        ApiError::ScoreService(error)
    }
}

impl From<ProgressServiceError> for ApiError {
    fn from(error: ProgressServiceError) -> Self {
        ApiError::ProgressService(error)
    }
}

impl From<StatsServiceError> for ApiError {
    fn from(error: StatsServiceError) -> Self {
        ApiError::StatsService(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn user_status(error: &UserServiceError) -> StatusCode {
    match error {
        UserServiceError::UserAlreadyExists
        | UserServiceError::UsernameTaken
        | UserServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
        UserServiceError::UserNotFound => StatusCode::NOT_FOUND,
        UserServiceError::HashingError(_) | UserServiceError::RepositoryError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserService(e) => user_status(e),

            ApiError::AuthService(AuthServiceError::UserServiceError(e)) => user_status(e),
            ApiError::AuthService(
                AuthServiceError::InvalidCredentials | AuthServiceError::ValidationError(_),
            ) => StatusCode::BAD_REQUEST,
            ApiError::AuthService(
                AuthServiceError::InvalidToken | AuthServiceError::ExpiredToken,
            ) => StatusCode::UNAUTHORIZED,
            ApiError::AuthService(AuthServiceError::JwtError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::ScoreService(ScoreServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ScoreService(ScoreServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::ProgressService(ProgressServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ProgressService(ProgressServiceError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::ProgressService(ProgressServiceError::Conflict) => StatusCode::CONFLICT,
            ApiError::ProgressService(ProgressServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::StatsService(StatsServiceError::UserNotFound) => StatusCode::NOT_FOUND,
            ApiError::StatsService(StatsServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::GameNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::UserService(e) => e.to_string(),
            ApiError::AuthService(e) => e.to_string(),
            ApiError::ScoreService(e) => e.to_string(),
            ApiError::ProgressService(e) => e.to_string(),
            ApiError::StatsService(e) => e.to_string(),
            ApiError::GameNotFound(id) => format!("Game '{}' not found", id),
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal details stay in the logs.
        let msg = if status.is_server_error() {
            error!("Request failed: {:?}", self);
            "Server error".to_string()
        } else {
            self.message()
        };

        (status, Json(ErrorResponse { msg })).into_response()
    }
}
