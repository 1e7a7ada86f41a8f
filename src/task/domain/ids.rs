//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task title, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Maximum length in characters, matching `tasks.title`.
    pub const MAX_LENGTH: usize = 200;

    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank and
    /// [`TaskDomainError::TitleTooLong`] past [`Self::MAX_LENGTH`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(TaskDomainError::TitleTooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key used to detect duplicate titles within a profile: trimmed and
    /// case-folded.
    #[must_use]
    pub fn matching_key(&self) -> String {
        self.0.to_lowercase()
    }

    /// Returns whether `other` would be a duplicate of this title.
    #[must_use]
    pub fn collides_with(&self, other: &str) -> bool {
        other.trim().to_lowercase() == self.matching_key()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Zero-based position of a task inside its status column.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskOrder(u32);

impl TaskOrder {
    /// The head of a column.
    pub const FIRST: Self = Self(0);

    /// Creates an order value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Converts a column index into an order value, saturating at
    /// `u32::MAX`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaskOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Requested zero-based position of a task in its target column after a
/// move. Values past the end of the column are clamped when the move is
/// planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnIndex(u64);

impl ColumnIndex {
    /// Creates a target index from a signed request value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NegativeIndex`] for values below zero.
    pub fn new(value: i64) -> Result<Self, TaskDomainError> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| TaskDomainError::NegativeIndex(value))
    }

    /// Parses a target index from request text.
    ///
    /// Digits beyond `u64::MAX` saturate, since any index past the end of
    /// the column lands on its last slot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidIndex`] when the text is not an
    /// integer and [`TaskDomainError::NegativeIndex`] when it is negative.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        let trimmed = value.trim();
        if let Some(magnitude) = trimmed.strip_prefix('-') {
            if !is_digits(magnitude) {
                return Err(TaskDomainError::InvalidIndex(value.to_owned()));
            }
            return trimmed.parse::<i64>().map_or_else(
                |_| Err(TaskDomainError::NegativeIndex(i64::MIN)),
                Self::new,
            );
        }
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if !is_digits(digits) {
            return Err(TaskDomainError::InvalidIndex(value.to_owned()));
        }
        Ok(Self(digits.parse::<u64>().unwrap_or(u64::MAX)))
    }

    /// Returns the index as `usize`, saturating on narrow targets.
    #[must_use]
    pub fn value(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl From<u64> for ColumnIndex {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

impl fmt::Display for ColumnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
