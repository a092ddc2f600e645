use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum StatsServiceError {
    UserNotFound,
    RepositoryError(String),
}

impl fmt::Display for StatsServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatsServiceError::UserNotFound => write!(f, "User not found"),
            StatsServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for StatsServiceError {}
