//! Crate-wide error taxonomy.
//!
//! Every service error classifies itself into one [`ErrorKind`] so the HTTP
//! layer can map failures to status codes without knowing each bounded
//! context's error enum.

use serde::Serialize;
use std::fmt;

/// Coarse classification shared by all service errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The profile, record, or task does not exist (or is owned by another
    /// profile).
    NotFound,
    /// Input failed validation before any mutation.
    InvalidArgument,
    /// The request conflicts with existing state, such as a duplicate title.
    Conflict,
    /// Unexpected storage failure; the transaction was rolled back.
    Internal,
}

impl ErrorKind {
    /// Returns the machine-readable code used in API error bodies.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
