//! Error types for profile domain validation.

use thiserror::Error;

/// Errors returned while constructing profile values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// The profile name is empty after trimming.
    #[error("profile name must not be empty")]
    EmptyName,

    /// The profile name exceeds the persisted column width.
    #[error("profile name exceeds {max} characters")]
    NameTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },

    /// The relationship label exceeds the persisted column width.
    #[error("relationship exceeds {max} characters")]
    RelationshipTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },
}

impl ProfileDomainError {
    /// Returns the request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::RelationshipTooLong { .. } => "relationship",
        }
    }
}
