//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title exceeds {max} characters")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The status is not one of `todo`, `inprogress`, `done`.
    #[error("invalid task status '{0}', expected one of todo, inprogress, done")]
    InvalidStatus(String),

    /// The target index is negative.
    #[error("target index {0} must be a non-negative integer")]
    NegativeIndex(i64),

    /// The target index is not an integer.
    #[error("target index '{0}' is not an integer")]
    InvalidIndex(String),
}

impl TaskDomainError {
    /// Returns the request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::InvalidStatus(_) => "status",
            Self::NegativeIndex(_) | Self::InvalidIndex(_) => "order",
        }
    }
}

/// Error returned while parsing task statuses from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

impl From<ParseTaskStatusError> for TaskDomainError {
    fn from(err: ParseTaskStatusError) -> Self {
        Self::InvalidStatus(err.0)
    }
}
