use crate::repositories::errors::progress_repository_errors::ProgressRepositoryError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressServiceError {
    NotFound,
    Conflict,
    ValidationError(String),
    RepositoryError(String),
}

impl fmt::Display for ProgressServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProgressServiceError::NotFound => write!(f, "Progress not found"),
            ProgressServiceError::Conflict => {
                write!(f, "Progress is being updated elsewhere, try again")
            }
            ProgressServiceError::ValidationError(msg) => write!(f, "{}", msg),
            ProgressServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ProgressServiceError {}

impl From<ProgressRepositoryError> for ProgressServiceError {
    fn from(error: ProgressRepositoryError) -> Self {
        match error {
            ProgressRepositoryError::NotFound => ProgressServiceError::NotFound,
            ProgressRepositoryError::Conflict => ProgressServiceError::Conflict,
            other => ProgressServiceError::RepositoryError(other.to_string()),
        }
    }
}
