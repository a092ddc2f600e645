use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    Parse(String),
    Io(String),
    DuplicateId(String),
    Invalid { game_id: String, reason: String },
}

impl CatalogError {
    pub fn invalid(game_id: &str, reason: impl Into<String>) -> Self {
        CatalogError::Invalid {
            game_id: game_id.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "Catalog parse error: {}", msg),
            CatalogError::Io(msg) => write!(f, "Catalog read error: {}", msg),
            CatalogError::DuplicateId(id) => write!(f, "Duplicate game id: {}", id),
            CatalogError::Invalid { game_id, reason } => {
                write!(f, "Invalid game definition '{}': {}", game_id, reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {}
