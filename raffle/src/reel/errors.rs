//! Reel error types.

use thiserror::Error;

use crate::pool::ParticipantId;

/// Reel plan errors
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ReelError {
    /// No participants to put on the reel
    #[error("cannot build a reel from an empty pool")]
    EmptyPool,

    /// Winner is not part of the pool the reel was built from
    #[error("winner {0} is not in the available pool")]
    WinnerNotInPool(ParticipantId),

    /// Invalid reel configuration
    #[error("invalid reel configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for reel operations
pub type ReelResult<T> = Result<T, ReelError>;
