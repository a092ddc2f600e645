use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum QuizError {
    NoQuestions,
    Finished,
    InvalidOption { choice: usize, options: usize },
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuizError::NoQuestions => write!(f, "Quiz has no questions"),
            QuizError::Finished => write!(f, "Quiz is already finished"),
            QuizError::InvalidOption { choice, options } => write!(
                f,
                "Option {} is out of range for a question with {} options",
                choice, options
            ),
        }
    }
}

impl std::error::Error for QuizError {}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineError {
    TooFewEvents,
    DuplicateEvent(String),
    UnknownEvent(String),
    WrongLength { expected: usize, actual: usize },
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimelineError::TooFewEvents => write!(f, "A timeline needs at least two events"),
            TimelineError::DuplicateEvent(id) => write!(f, "Event '{}' appears more than once", id),
            TimelineError::UnknownEvent(id) => write!(f, "Unknown event '{}'", id),
            TimelineError::WrongLength { expected, actual } => write!(
                f,
                "Expected an ordering of {} events, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for TimelineError {}

#[derive(Debug, Clone, PartialEq)]
pub enum MemoryMatchError {
    TooFewPairs,
    OutOfRange(usize),
    AlreadyFaceUp(usize),
    AlreadyMatched(usize),
    MismatchPending,
}

impl fmt::Display for MemoryMatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryMatchError::TooFewPairs => write!(f, "A memory board needs at least two pairs"),
            MemoryMatchError::OutOfRange(index) => write!(f, "Card {} does not exist", index),
            MemoryMatchError::AlreadyFaceUp(index) => write!(f, "Card {} is already face up", index),
            MemoryMatchError::AlreadyMatched(index) => {
                write!(f, "Card {} has already been matched", index)
            }
            MemoryMatchError::MismatchPending => {
                write!(f, "Hide the mismatched pair before flipping again")
            }
        }
    }
}

impl std::error::Error for MemoryMatchError {}
