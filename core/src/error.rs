use alloc::string::String;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Board needs {expected} letters but {actual} were given")]
    MalformedBoardInput { expected: usize, actual: usize },
    #[error("Board dimensions must be at least 1x1")]
    InvalidDimensions,
    #[error("Dictionary is empty")]
    EmptyDictionary,
    #[error("Letter frequency table is empty")]
    EmptyFrequencyTable,
    #[error("Letter frequency entry {0:?} is not a single lowercase letter")]
    InvalidFrequencyEntry(String),
    #[error("Tile index {0} is outside the board")]
    InvalidTileIndex(usize),
    #[error("{0} is not a valid YYYYMMDD day key")]
    InvalidDayKey(u32),
    #[error("{0:?} is not a YYYYMMDD day key")]
    MalformedDayKey(String),
    #[error("Puzzle has not been started yet")]
    NotStarted,
    #[error("Puzzle already completed, no new moves are accepted")]
    AlreadyCompleted,
    #[error("{0:?} is not part of this puzzle's solution")]
    WordNotInSolution(String),
    #[error("{0:?} has already been found")]
    WordAlreadyFound(String),
    #[error("No hints left")]
    InsufficientHints,
    #[error("Could not save progress: {reason}")]
    PersistenceFailure { reason: String },
    #[error("Previous progress has not been saved yet")]
    SavePending,
}

impl PuzzleError {
    /// Whether the caller can reasonably recover by retrying or topping up.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientHints | Self::PersistenceFailure { .. } | Self::SavePending
        )
    }
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
