use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum UserServiceError {
    UserNotFound,
    UserAlreadyExists,
    UsernameTaken,
    ValidationError(String),
    HashingError(String),
    RepositoryError(String),
}

impl fmt::Display for UserServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserServiceError::UserNotFound => write!(f, "User not found"),
            UserServiceError::UserAlreadyExists => write!(f, "User already exists"),
            UserServiceError::UsernameTaken => write!(f, "Username is already taken"),
            UserServiceError::ValidationError(msg) => write!(f, "{}", msg),
            UserServiceError::HashingError(msg) => write!(f, "Password hashing error: {}", msg),
            UserServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UserServiceError {}
