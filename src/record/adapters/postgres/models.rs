//! Diesel row models for medical record persistence.

use super::schema::medical_records;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Row shape shared by queries, inserts, and updates.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = medical_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct MedicalRecordRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Owning profile.
    pub profile_id: uuid::Uuid,
    /// Record title.
    pub title: String,
    /// Document date.
    pub record_date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Image attachment reference.
    pub image: Option<String>,
    /// Inline image payload.
    pub image_data: Option<String>,
    /// Analysis summary.
    pub analysis_summary: Option<String>,
    /// Analysis follow-up actions.
    pub analysis_actions: Option<String>,
    /// Analysis recommendations.
    pub analysis_recommendations: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
