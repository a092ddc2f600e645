use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum WordSearchError {
    EmptyGrid,
    NoDirections,
    NoWords,
    EmptyWord,
    InvalidCharacter { word: String },
    WordTooLong { word: String, size: usize },
    DuplicateWord { word: String },
    NestedWord { word: String, container: String },
    PlacementFailed { word: String },
    AmbiguousGrid { word: String },
}

impl fmt::Display for WordSearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WordSearchError::EmptyGrid => write!(f, "Grid size must be greater than zero"),
            WordSearchError::NoDirections => write!(f, "At least one direction is required"),
            WordSearchError::NoWords => write!(f, "At least one word is required"),
            WordSearchError::EmptyWord => write!(f, "Words cannot be empty"),
            WordSearchError::InvalidCharacter { word } => {
                write!(f, "Word '{}' contains characters outside A-Z", word)
            }
            WordSearchError::WordTooLong { word, size } => {
                write!(f, "Word '{}' does not fit in a {}x{} grid", word, size, size)
            }
            WordSearchError::DuplicateWord { word } => write!(f, "Duplicate word '{}'", word),
            WordSearchError::NestedWord { word, container } => {
                write!(f, "Word '{}' is contained in '{}'", word, container)
            }
            WordSearchError::PlacementFailed { word } => {
                write!(f, "Could not place word '{}' within the attempt limit", word)
            }
            WordSearchError::AmbiguousGrid { word } => {
                write!(f, "Word '{}' does not occur exactly once in the grid", word)
            }
        }
    }
}

impl std::error::Error for WordSearchError {}
