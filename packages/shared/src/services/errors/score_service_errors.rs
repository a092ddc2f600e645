use crate::repositories::errors::score_repository_errors::ScoreRepositoryError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreServiceError {
    ValidationError(String),
    RepositoryError(String),
}

impl fmt::Display for ScoreServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScoreServiceError::ValidationError(msg) => write!(f, "{}", msg),
            ScoreServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ScoreServiceError {}

impl From<ScoreRepositoryError> for ScoreServiceError {
    fn from(error: ScoreRepositoryError) -> Self {
        ScoreServiceError::RepositoryError(error.to_string())
    }
}
