//! Participant error types.

use thiserror::Error;

/// Participant validation errors
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParticipantError {
    /// Name is blank
    #[error("{0} must not be empty")]
    EmptyName(&'static str),

    /// Name below the minimum length
    #[error("{field} must be at least {min} characters")]
    NameTooShort { field: &'static str, min: usize },

    /// Name above the maximum length
    #[error("{field} must be at most {max} characters")]
    NameTooLong { field: &'static str, max: usize },
}

/// Result type for participant operations
pub type ParticipantResult<T> = Result<T, ParticipantError>;
