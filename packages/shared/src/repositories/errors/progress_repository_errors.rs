#[derive(Debug, Clone, PartialEq)]
pub enum ProgressRepositoryError {
    NotFound,
    /// The stored version no longer matches the one the write expected.
    Conflict,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for ProgressRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressRepositoryError::NotFound => write!(f, "Progress not found"),
            ProgressRepositoryError::Conflict => write!(f, "Progress was modified concurrently"),
            ProgressRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ProgressRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for ProgressRepositoryError {}
