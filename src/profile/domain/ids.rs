//! Identifier and validated scalar types for the profile domain.

use super::ProfileDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Creates a new random profile identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a profile identifier from an existing UUID.
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

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name of a profile, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileName(String);

impl ProfileName {
    /// Maximum length in characters, matching the `profiles.name` column.
    pub const MAX_LENGTH: usize = 100;

    /// Creates a validated profile name.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyName`] when the value is blank and
    /// [`ProfileDomainError::NameTooLong`] when it exceeds
    /// [`Self::MAX_LENGTH`].
    pub fn new(value: impl Into<String>) -> Result<Self, ProfileDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProfileDomainError::EmptyName);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(ProfileDomainError::NameTooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text relationship of the profile to the account holder
/// (for example "self", "mother", "son").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relationship(String);

impl Relationship {
    /// Maximum length in characters, matching the `profiles.relationship`
    /// column.
    pub const MAX_LENGTH: usize = 100;

    /// Creates a trimmed relationship label. Empty labels are permitted.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::RelationshipTooLong`] when the label
    /// exceeds [`Self::MAX_LENGTH`].
    pub fn new(value: impl Into<String>) -> Result<Self, ProfileDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(ProfileDomainError::RelationshipTooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the label as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
