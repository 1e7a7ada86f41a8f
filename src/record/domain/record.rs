//! Medical record aggregate.

use super::{MedicalRecordId, RecordDomainError, RecordTitle};
use crate::profile::domain::ProfileId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Longest accepted image reference, matching `medical_records.image`.
const MAX_IMAGE_REFERENCE: usize = 500;

/// Free-text analysis attached to a record. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAnalysis {
    /// Plain-language summary of the document.
    pub summary: Option<String>,
    /// Suggested follow-up actions.
    pub actions: Option<String>,
    /// Recommendations for the profile owner.
    pub recommendations: Option<String>,
}

/// Validated input for creating a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedicalRecord {
    /// Owning profile.
    pub profile_id: ProfileId,
    /// Record title.
    pub title: RecordTitle,
    /// Calendar date of the document.
    pub date: NaiveDate,
    /// Free-text description; empty when not supplied.
    pub description: String,
    /// Image attachment reference.
    pub image: Option<String>,
    /// Inline image payload, typically base64.
    pub image_data: Option<String>,
    /// Analysis fields.
    pub analysis: RecordAnalysis,
}

/// A medical document owned by exactly one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    id: MedicalRecordId,
    profile_id: ProfileId,
    title: RecordTitle,
    date: NaiveDate,
    description: String,
    image: Option<String>,
    image_data: Option<String>,
    analysis: RecordAnalysis,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRecordData {
    /// Persisted record identifier.
    pub id: MedicalRecordId,
    /// Owning profile.
    pub profile_id: ProfileId,
    /// Persisted title.
    pub title: RecordTitle,
    /// Persisted document date.
    pub date: NaiveDate,
    /// Persisted description.
    pub description: String,
    /// Persisted image reference.
    pub image: Option<String>,
    /// Persisted inline image payload.
    pub image_data: Option<String>,
    /// Persisted analysis fields.
    pub analysis: RecordAnalysis,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Normalizes an optional image reference: trims it and treats blank as
/// absent.
///
/// # Errors
///
/// Returns [`RecordDomainError::InvalidImageReference`] when the reference is
/// longer than the storage column.
pub(crate) fn normalize_image_reference(
    value: Option<String>,
) -> Result<Option<String>, RecordDomainError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_IMAGE_REFERENCE {
        return Err(RecordDomainError::InvalidImageReference(format!(
            "reference exceeds {MAX_IMAGE_REFERENCE} characters"
        )));
    }
    Ok(Some(trimmed.to_owned()))
}

impl MedicalRecord {
    /// Creates a record from validated input.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::InvalidImageReference`] when the image
    /// reference is too long.
    pub fn new(input: NewMedicalRecord, clock: &impl Clock) -> Result<Self, RecordDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: MedicalRecordId::new(),
            profile_id: input.profile_id,
            title: input.title,
            date: input.date,
            description: input.description,
            image: normalize_image_reference(input.image)?,
            image_data: input.image_data,
            analysis: input.analysis,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRecordData) -> Self {
        Self {
            id: data.id,
            profile_id: data.profile_id,
            title: data.title,
            date: data.date,
            description: data.description,
            image: data.image,
            image_data: data.image_data,
            analysis: data.analysis,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> MedicalRecordId {
        self.id
    }

    /// Returns the owning profile.
    #[must_use]
    pub const fn profile_id(&self) -> ProfileId {
        self.profile_id
    }

    /// Returns the record title.
    #[must_use]
    pub const fn title(&self) -> &RecordTitle {
        &self.title
    }

    /// Returns the document date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the image reference, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the inline image payload, if any.
    #[must_use]
    pub fn image_data(&self) -> Option<&str> {
        self.image_data.as_deref()
    }

    /// Returns the analysis fields.
    #[must_use]
    pub const fn analysis(&self) -> &RecordAnalysis {
        &self.analysis
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

    /// Replaces the title.
    pub fn retitle(&mut self, title: RecordTitle) {
        self.title = title;
    }

    /// Replaces the document date.
    pub const fn redate(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Replaces the description.
    pub fn describe(&mut self, description: String) {
        self.description = description;
    }

    /// Replaces or clears the image reference.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDomainError::InvalidImageReference`] when the
    /// reference is too long.
    pub fn attach_image(&mut self, image: Option<String>) -> Result<(), RecordDomainError> {
        self.image = normalize_image_reference(image)?;
        Ok(())
    }

    /// Replaces or clears the inline image payload.
    pub fn set_image_data(&mut self, image_data: Option<String>) {
        self.image_data = image_data;
    }

    /// Returns mutable access to the analysis fields.
    pub const fn analysis_mut(&mut self) -> &mut RecordAnalysis {
        &mut self.analysis
    }

    /// Updates the modification timestamp.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
