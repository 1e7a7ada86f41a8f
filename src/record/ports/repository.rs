//! Repository port for medical record persistence.

use crate::profile::domain::ProfileId;
use crate::record::domain::{MedicalRecord, MedicalRecordId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for medical record repository operations.
pub type MedicalRecordRepositoryResult<T> = Result<T, MedicalRecordRepositoryError>;

/// Medical record persistence contract. Lookups are scoped by owning profile.
#[async_trait]
pub trait MedicalRecordRepository: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`MedicalRecordRepositoryError::ProfileNotFound`] when the
    /// owning profile does not exist.
    async fn store(&self, record: &MedicalRecord) -> MedicalRecordRepositoryResult<()>;

    /// Persists changes to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`MedicalRecordRepositoryError::NotFound`] when the record does
    /// not exist under its profile.
    async fn update(&self, record: &MedicalRecord) -> MedicalRecordRepositoryResult<()>;

    /// Finds a record owned by the given profile.
    async fn find_by_id(
        &self,
        profile_id: ProfileId,
        id: MedicalRecordId,
    ) -> MedicalRecordRepositoryResult<Option<MedicalRecord>>;

    /// Returns the profile's records, newest document date first.
    async fn list_by_profile(
        &self,
        profile_id: ProfileId,
    ) -> MedicalRecordRepositoryResult<Vec<MedicalRecord>>;

    /// Deletes a record owned by the given profile.
    ///
    /// # Errors
    ///
    /// Returns [`MedicalRecordRepositoryError::NotFound`] when the record does
    /// not exist under the profile.
    async fn delete(
        &self,
        profile_id: ProfileId,
        id: MedicalRecordId,
    ) -> MedicalRecordRepositoryResult<()>;
}

/// Errors returned by medical record repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MedicalRecordRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate medical record identifier: {0}")]
    DuplicateRecord(MedicalRecordId),

    /// The record was not found under the profile.
    #[error("medical record not found: {0}")]
    NotFound(MedicalRecordId),

    /// The owning profile does not exist.
    #[error("profile not found: {0}")]
    ProfileNotFound(ProfileId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MedicalRecordRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
