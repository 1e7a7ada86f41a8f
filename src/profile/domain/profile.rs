//! Profile aggregate root.

use super::{ProfileId, ProfileName, Relationship};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A family member or patient owning medical records and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: ProfileId,
    name: ProfileName,
    relationship: Relationship,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Persisted profile identifier.
    pub id: ProfileId,
    /// Persisted display name.
    pub name: ProfileName,
    /// Persisted relationship label.
    pub relationship: Relationship,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a new profile stamped with the current clock time.
    #[must_use]
    pub fn new(name: ProfileName, relationship: Relationship, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProfileId::new(),
            name,
            relationship,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            relationship: data.relationship,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the profile identifier.
    #[must_use]
    pub const fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ProfileName {
        &self.name
    }

    /// Returns the relationship label.
    #[must_use]
    pub const fn relationship(&self) -> &Relationship {
        &self.relationship
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the display name.
    pub fn rename(&mut self, name: ProfileName, clock: &impl Clock) {
        self.name = name;
        self.touch(clock);
    }

    /// Replaces the relationship label.
    pub fn relate(&mut self, relationship: Relationship, clock: &impl Clock) {
        self.relationship = relationship;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
