//! Service layer for medical record CRUD scoped to a profile.

use crate::error::ErrorKind;
use crate::profile::{
    domain::ProfileId,
    ports::{ProfileRepository, ProfileRepositoryError},
};
use crate::record::{
    domain::{
        MedicalRecord, MedicalRecordId, NewMedicalRecord, RecordAnalysis, RecordDomainError,
        RecordTitle,
    },
    ports::{MedicalRecordRepository, MedicalRecordRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a medical record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecordRequest {
    profile_id: ProfileId,
    title: String,
    date: NaiveDate,
    description: String,
    image: Option<String>,
    image_data: Option<String>,
    analysis: RecordAnalysis,
}

impl CreateRecordRequest {
    /// Creates a request with the required title and document date.
    #[must_use]
    pub fn new(profile_id: ProfileId, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            profile_id,
            title: title.into(),
            date,
            description: String::new(),
            image: None,
            image_data: None,
            analysis: RecordAnalysis::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image attachment reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Sets the inline image payload.
    #[must_use]
    pub fn with_image_data(mut self, image_data: impl Into<String>) -> Self {
        self.image_data = Some(image_data.into());
        self
    }

    /// Sets the analysis fields.
    #[must_use]
    pub fn with_analysis(mut self, analysis: RecordAnalysis) -> Self {
        self.analysis = analysis;
        self
    }
}

/// Request payload for a partial record update.
///
/// Optional attributes are tri-state: untouched, cleared (`Some(None)`), or
/// replaced (`Some(Some(_))`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecordRequest {
    profile_id: ProfileId,
    id: MedicalRecordId,
    title: Option<String>,
    date: Option<NaiveDate>,
    description: Option<String>,
    image: Option<Option<String>>,
    image_data: Option<Option<String>>,
    analysis_summary: Option<Option<String>>,
    analysis_actions: Option<Option<String>>,
    analysis_recommendations: Option<Option<String>>,
}

impl UpdateRecordRequest {
    /// Creates an update that changes nothing until fields are set.
    #[must_use]
    pub const fn new(profile_id: ProfileId, id: MedicalRecordId) -> Self {
        Self {
            profile_id,
            id,
            title: None,
            date: None,
            description: None,
            image: None,
            image_data: None,
            analysis_summary: None,
            analysis_actions: None,
            analysis_recommendations: None,
        }
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new document date.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces (`Some`) or clears (`None`) the image reference.
    #[must_use]
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = Some(image);
        self
    }

    /// Replaces (`Some`) or clears (`None`) the inline image payload.
    #[must_use]
    pub fn with_image_data(mut self, image_data: Option<String>) -> Self {
        self.image_data = Some(image_data);
        self
    }

    /// Replaces (`Some`) or clears (`None`) the analysis summary.
    #[must_use]
    pub fn with_analysis_summary(mut self, summary: Option<String>) -> Self {
        self.analysis_summary = Some(summary);
        self
    }

    /// Replaces (`Some`) or clears (`None`) the analysis actions.
    #[must_use]
    pub fn with_analysis_actions(mut self, actions: Option<String>) -> Self {
        self.analysis_actions = Some(actions);
        self
    }

    /// Replaces (`Some`) or clears (`None`) the analysis recommendations.
    #[must_use]
    pub fn with_analysis_recommendations(mut self, recommendations: Option<String>) -> Self {
        self.analysis_recommendations = Some(recommendations);
        self
    }
}

/// Service-level errors for medical record operations.
#[derive(Debug, Error)]
pub enum RecordServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RecordDomainError),
    /// The owning profile does not exist.
    #[error("profile not found: {0}")]
    ProfileNotFound(ProfileId),
    /// The record does not exist under the profile.
    #[error("medical record not found: {0}")]
    NotFound(MedicalRecordId),
    /// Record repository operation failed.
    #[error(transparent)]
    Repository(#[from] MedicalRecordRepositoryError),
    /// Profile lookup failed.
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
}

impl RecordServiceError {
    /// Classifies the error for API mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::InvalidArgument,
            Self::ProfileNotFound(_)
            | Self::NotFound(_)
            | Self::Repository(
                MedicalRecordRepositoryError::NotFound(_)
                | MedicalRecordRepositoryError::ProfileNotFound(_),
            )
            | Self::Profiles(ProfileRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(MedicalRecordRepositoryError::DuplicateRecord(_))
            | Self::Profiles(ProfileRepositoryError::DuplicateProfile(_)) => ErrorKind::Conflict,
            Self::Repository(MedicalRecordRepositoryError::Persistence(_))
            | Self::Profiles(ProfileRepositoryError::Persistence(_)) => ErrorKind::Internal,
        }
    }
}

/// Result type for medical record service operations.
pub type RecordServiceResult<T> = Result<T, RecordServiceError>;

/// Medical record orchestration service.
#[derive(Clone)]
pub struct MedicalRecordService<P, R, C>
where
    P: ProfileRepository,
    R: MedicalRecordRepository,
    C: Clock + Send + Sync,
{
    profiles: Arc<P>,
    records: Arc<R>,
    clock: Arc<C>,
}

impl<P, R, C> MedicalRecordService<P, R, C>
where
    P: ProfileRepository,
    R: MedicalRecordRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new medical record service.
    #[must_use]
    pub const fn new(profiles: Arc<P>, records: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            profiles,
            records,
            clock,
        }
    }

    /// Creates a record under a profile.
    ///
    /// # Errors
    ///
    /// Returns [`RecordServiceError::Domain`] for invalid input and
    /// [`RecordServiceError::ProfileNotFound`] when the profile is absent.
    pub async fn create_record(
        &self,
        request: CreateRecordRequest,
    ) -> RecordServiceResult<MedicalRecord> {
        let title = RecordTitle::new(request.title)?;
        let input = NewMedicalRecord {
            profile_id: request.profile_id,
            title,
            date: request.date,
            description: request.description,
            image: request.image,
            image_data: request.image_data,
            analysis: request.analysis,
        };
        let record = MedicalRecord::new(input, &*self.clock)?;
        self.ensure_profile(request.profile_id).await?;
        self.records.store(&record).await?;
        tracing::debug!(
            profile_id = %record.profile_id(),
            record_id = %record.id(),
            "medical record created"
        );
        Ok(record)
    }

    /// Fetches a record owned by the profile.
    ///
    /// # Errors
    ///
    /// Returns [`RecordServiceError::NotFound`] when the record is absent.
    pub async fn get_record(
        &self,
        profile_id: ProfileId,
        id: MedicalRecordId,
    ) -> RecordServiceResult<MedicalRecord> {
        self.records
            .find_by_id(profile_id, id)
            .await?
            .ok_or(RecordServiceError::NotFound(id))
    }

    /// Lists the profile's records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RecordServiceError::ProfileNotFound`] when the profile is
    /// absent.
    pub async fn list_records(
        &self,
        profile_id: ProfileId,
    ) -> RecordServiceResult<Vec<MedicalRecord>> {
        self.ensure_profile(profile_id).await?;
        Ok(self.records.list_by_profile(profile_id).await?)
    }

    /// Applies a partial update to a record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordServiceError::Domain`] for invalid fields and
    /// [`RecordServiceError::NotFound`] when the record is absent.
    pub async fn update_record(
        &self,
        request: UpdateRecordRequest,
    ) -> RecordServiceResult<MedicalRecord> {
        let new_title = request.title.map(RecordTitle::new).transpose()?;
        let mut record = self.get_record(request.profile_id, request.id).await?;

        if let Some(title) = new_title {
            record.retitle(title);
        }
        if let Some(date) = request.date {
            record.redate(date);
        }
        if let Some(description) = request.description {
            record.describe(description);
        }
        if let Some(image) = request.image {
            record.attach_image(image)?;
        }
        if let Some(image_data) = request.image_data {
            record.set_image_data(image_data);
        }
        let analysis = record.analysis_mut();
        if let Some(summary) = request.analysis_summary {
            analysis.summary = summary;
        }
        if let Some(actions) = request.analysis_actions {
            analysis.actions = actions;
        }
        if let Some(recommendations) = request.analysis_recommendations {
            analysis.recommendations = recommendations;
        }
        record.touch(&*self.clock);

        self.records.update(&record).await?;
        Ok(record)
    }

    /// Deletes a record owned by the profile.
    ///
    /// # Errors
    ///
    /// Returns [`RecordServiceError::Repository`] with a not-found variant
    /// when the record is absent.
    pub async fn delete_record(
        &self,
        profile_id: ProfileId,
        id: MedicalRecordId,
    ) -> RecordServiceResult<()> {
        self.records.delete(profile_id, id).await?;
        tracing::debug!(profile_id = %profile_id, record_id = %id, "medical record deleted");
        Ok(())
    }

    async fn ensure_profile(&self, profile_id: ProfileId) -> RecordServiceResult<()> {
        if self.profiles.exists(profile_id).await? {
            Ok(())
        } else {
            Err(RecordServiceError::ProfileNotFound(profile_id))
        }
    }
}
