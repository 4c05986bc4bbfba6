//! Error types for the draw module

use thiserror::Error;

use crate::reel::ReelError;

/// Result type for selector operations
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Secure selector errors
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SelectorError {
    /// Asked to pick from zero candidates
    #[error("cannot pick from an empty range")]
    EmptyRange,
}

/// Result type for draw operations
pub type DrawResult<T> = Result<T, DrawError>;

/// Draw state machine errors.
///
/// None of these are fatal: a failed call leaves the state machine
/// exactly where it was.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum DrawError {
    /// Start requested with nobody available
    #[error("raffle is empty, add participants before starting")]
    EmptyPool,

    /// Start requested while a draw is spinning or awaiting the next round
    #[error("a draw is already in progress")]
    DrawInProgress,

    /// Next round requested before the winner was revealed
    #[error("no finished draw to advance from")]
    RoundNotEnded,

    /// Reel plan could not be built
    #[error("reel error: {0}")]
    Reel(#[from] ReelError),

    /// Selector failure
    #[error("selector error: {0}")]
    Selector(#[from] SelectorError),
}

impl DrawError {
    /// Whether this is a rejected user action (surface as a message) rather
    /// than a caller contract violation.
    pub fn is_user_rejection(&self) -> bool {
        matches!(
            self,
            DrawError::EmptyPool | DrawError::DrawInProgress | DrawError::RoundNotEnded
        )
    }
}
