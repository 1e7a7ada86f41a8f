//! Error types for medical record validation.

use thiserror::Error;

/// Errors returned while constructing medical record values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordDomainError {
    /// The record title is empty after trimming.
    #[error("record title must not be empty")]
    EmptyTitle,

    /// The record title exceeds the persisted column width.
    #[error("record title exceeds {max} characters")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The image reference is blank or too long.
    #[error("invalid image reference: {0}")]
    InvalidImageReference(String),
}

impl RecordDomainError {
    /// Returns the request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::InvalidImageReference(_) => "image",
        }
    }
}
