//! Service layer for profile CRUD and cascading deletion.

use crate::error::ErrorKind;
use crate::profile::{
    domain::{Profile, ProfileDomainError, ProfileId, ProfileName, Relationship},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use crate::record::{
    domain::MedicalRecord,
    ports::{MedicalRecordRepository, MedicalRecordRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProfileRequest {
    name: String,
    relationship: String,
}

impl CreateProfileRequest {
    /// Creates a request with the required display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relationship: String::new(),
        }
    }

    /// Sets the relationship label.
    #[must_use]
    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = relationship.into();
        self
    }
}

/// Request payload for a partial profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    id: ProfileId,
    name: Option<String>,
    relationship: Option<String>,
}

impl UpdateProfileRequest {
    /// Creates an update that changes nothing until fields are set.
    #[must_use]
    pub const fn new(id: ProfileId) -> Self {
        Self {
            id,
            name: None,
            relationship: None,
        }
    }

    /// Sets a new display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new relationship label.
    #[must_use]
    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }
}

/// A profile together with its medical records, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileOverview {
    /// The profile.
    pub profile: Profile,
    /// Medical records owned by the profile.
    pub medical_records: Vec<MedicalRecord>,
}

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProfileDomainError),
    /// The profile does not exist.
    #[error("profile not found: {0}")]
    NotFound(ProfileId),
    /// Profile repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
    /// Medical record repository operation failed.
    #[error(transparent)]
    Records(#[from] MedicalRecordRepositoryError),
}

impl ProfileServiceError {
    /// Classifies the error for API mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) | Self::Repository(ProfileRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(ProfileRepositoryError::DuplicateProfile(_)) => ErrorKind::Conflict,
            Self::Repository(ProfileRepositoryError::Persistence(_)) | Self::Records(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile orchestration service.
///
/// Reads medical records for the profile overview. Deleting a profile is a
/// single repository call; the profile repository removes owned rows with it.
#[derive(Clone)]
pub struct ProfileService<P, R, C>
where
    P: ProfileRepository,
    R: MedicalRecordRepository,
    C: Clock + Send + Sync,
{
    profiles: Arc<P>,
    records: Arc<R>,
    clock: Arc<C>,
}

impl<P, R, C> ProfileService<P, R, C>
where
    P: ProfileRepository,
    R: MedicalRecordRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(profiles: Arc<P>, records: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            profiles,
            records,
            clock,
        }
    }

    /// Creates a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Domain`] when the name or relationship
    /// is invalid, or a repository error when persistence fails.
    pub async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> ProfileServiceResult<Profile> {
        let name = ProfileName::new(request.name)?;
        let relationship = Relationship::new(request.relationship)?;
        let profile = Profile::new(name, relationship, &*self.clock);
        self.profiles.store(&profile).await?;
        tracing::info!(profile_id = %profile.id(), "profile created");
        Ok(profile)
    }

    /// Fetches a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] when the profile is absent.
    pub async fn get_profile(&self, id: ProfileId) -> ProfileServiceResult<Profile> {
        self.profiles
            .find_by_id(id)
            .await?
            .ok_or(ProfileServiceError::NotFound(id))
    }

    /// Lists every profile ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when the lookup fails.
    pub async fn list_profiles(&self) -> ProfileServiceResult<Vec<Profile>> {
        Ok(self.profiles.list().await?)
    }

    /// Fetches a profile with its medical records.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] when the profile is absent.
    pub async fn profile_overview(&self, id: ProfileId) -> ProfileServiceResult<ProfileOverview> {
        let profile = self.get_profile(id).await?;
        let medical_records = self.records.list_by_profile(id).await?;
        Ok(ProfileOverview {
            profile,
            medical_records,
        })
    }

    /// Applies a partial update to a profile.
    ///
    /// Every supplied field is validated before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Domain`] for invalid fields and
    /// [`ProfileServiceError::NotFound`] when the profile is absent.
    pub async fn update_profile(
        &self,
        request: UpdateProfileRequest,
    ) -> ProfileServiceResult<Profile> {
        let UpdateProfileRequest {
            id,
            name,
            relationship,
        } = request;
        let new_name = name.map(ProfileName::new).transpose()?;
        let new_relationship = relationship.map(Relationship::new).transpose()?;

        let mut profile = self.get_profile(id).await?;
        if let Some(value) = new_name {
            profile.rename(value, &*self.clock);
        }
        if let Some(value) = new_relationship {
            profile.relate(value, &*self.clock);
        }
        self.profiles.update(&profile).await?;
        Ok(profile)
    }

    /// Deletes a profile together with its medical records and tasks.
    ///
    /// The cascade is atomic: a failure leaves the profile and everything it
    /// owns in place.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] when the profile is absent.
    pub async fn delete_profile(&self, id: ProfileId) -> ProfileServiceResult<()> {
        match self.profiles.delete(id).await {
            Ok(()) => {
                tracing::info!(profile_id = %id, "profile deleted");
                Ok(())
            }
            Err(ProfileRepositoryError::NotFound(_)) => Err(ProfileServiceError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}
