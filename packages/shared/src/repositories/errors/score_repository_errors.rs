#[derive(Debug, Clone, PartialEq)]
pub enum ScoreRepositoryError {
    AlreadyExists,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for ScoreRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreRepositoryError::AlreadyExists => write!(f, "Score already exists"),
            ScoreRepositoryError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ScoreRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for ScoreRepositoryError {}
