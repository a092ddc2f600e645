use crate::services::errors::user_service_errors::UserServiceError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthServiceError {
    UserServiceError(UserServiceError),
    InvalidCredentials,
    JwtError(String),
    ValidationError(String),
    InvalidToken,
    ExpiredToken,
}

impl fmt::Display for AuthServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthServiceError::UserServiceError(err) => write!(f, "{}", err),
            AuthServiceError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthServiceError::JwtError(msg) => write!(f, "JWT error: {}", msg),
            AuthServiceError::ValidationError(msg) => write!(f, "{}", msg),
            AuthServiceError::InvalidToken => write!(f, "Token is not valid"),
            AuthServiceError::ExpiredToken => write!(f, "Token has expired"),
        }
    }
}

impl std::error::Error for AuthServiceError {}

impl From<UserServiceError> for AuthServiceError {
    fn from(error: UserServiceError) -> Self {
        AuthServiceError::UserServiceError(error)
    }
}
