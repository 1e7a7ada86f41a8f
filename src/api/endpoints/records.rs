//! Medical record endpoints, scoped to a profile.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;

use super::profiles::profile_id;
use super::{explicit_null, parse_uuid};
use crate::api::error::ApiError;
use crate::api::state::{AppState, Stores};
use crate::record::domain::{MedicalRecord, MedicalRecordId, RecordAnalysis};
use crate::record::services::{CreateRecordRequest, UpdateRecordRequest};

/// Body of `POST /api/profiles/:profile_id/medical-records`.
#[derive(Debug, Deserialize)]
pub struct CreateRecordBody {
    /// Record title.
    pub title: String,
    /// Document date, `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Free-text description.
    #[serde(default)]
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
}

/// Body of `PATCH /api/profiles/:profile_id/medical-records/:id`.
///
/// Optional attributes accept `null` to clear the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecordBody {
    /// New title.
    pub title: Option<String>,
    /// New document date.
    pub date: Option<NaiveDate>,
    /// New description.
    pub description: Option<String>,
    /// Image reference change.
    #[serde(default, deserialize_with = "explicit_null")]
    pub image: Option<Option<String>>,
    /// Inline image payload change.
    #[serde(default, deserialize_with = "explicit_null")]
    pub image_data: Option<Option<String>>,
    /// Analysis summary change.
    #[serde(default, deserialize_with = "explicit_null")]
    pub analysis_summary: Option<Option<String>>,
    /// Analysis actions change.
    #[serde(default, deserialize_with = "explicit_null")]
    pub analysis_actions: Option<Option<String>>,
    /// Analysis recommendations change.
    #[serde(default, deserialize_with = "explicit_null")]
    pub analysis_recommendations: Option<Option<String>>,
}

fn record_id(raw: &str) -> Result<MedicalRecordId, ApiError> {
    parse_uuid(raw, "id").map(MedicalRecordId::from_uuid)
}

/// `GET /api/profiles/:profile_id/medical-records`
pub async fn list<S: Stores>(
    State(state): State<AppState<S>>,
    Path(raw_profile): Path<String>,
) -> Result<Json<Vec<MedicalRecord>>, ApiError> {
    let owner = profile_id(&raw_profile)?;
    Ok(Json(state.records.list_records(owner).await?))
}

/// `POST /api/profiles/:profile_id/medical-records`
pub async fn create<S: Stores>(
    State(state): State<AppState<S>>,
    Path(raw_profile): Path<String>,
    payload: Result<Json<CreateRecordBody>, JsonRejection>,
) -> Result<(StatusCode, Json<MedicalRecord>), ApiError> {
    let owner = profile_id(&raw_profile)?;
    let Json(body) = payload?;
    let mut request = CreateRecordRequest::new(owner, body.title, body.date)
        .with_description(body.description)
        .with_analysis(RecordAnalysis {
            summary: body.analysis_summary,
            actions: body.analysis_actions,
            recommendations: body.analysis_recommendations,
        });
    if let Some(image) = body.image {
        request = request.with_image(image);
    }
    if let Some(image_data) = body.image_data {
        request = request.with_image_data(image_data);
    }
    let record = state.records.create_record(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/profiles/:profile_id/medical-records/:id`
pub async fn detail<S: Stores>(
    State(state): State<AppState<S>>,
    Path((raw_profile, raw_id)): Path<(String, String)>,
) -> Result<Json<MedicalRecord>, ApiError> {
    let owner = profile_id(&raw_profile)?;
    let id = record_id(&raw_id)?;
    Ok(Json(state.records.get_record(owner, id).await?))
}

/// `PATCH /api/profiles/:profile_id/medical-records/:id`
pub async fn update<S: Stores>(
    State(state): State<AppState<S>>,
    Path((raw_profile, raw_id)): Path<(String, String)>,
    payload: Result<Json<UpdateRecordBody>, JsonRejection>,
) -> Result<Json<MedicalRecord>, ApiError> {
    let owner = profile_id(&raw_profile)?;
    let id = record_id(&raw_id)?;
    let Json(body) = payload?;

    let mut request = UpdateRecordRequest::new(owner, id);
    if let Some(title) = body.title {
        request = request.with_title(title);
    }
    if let Some(date) = body.date {
        request = request.with_date(date);
    }
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(image) = body.image {
        request = request.with_image(image);
    }
    if let Some(image_data) = body.image_data {
        request = request.with_image_data(image_data);
    }
    if let Some(summary) = body.analysis_summary {
        request = request.with_analysis_summary(summary);
    }
    if let Some(actions) = body.analysis_actions {
        request = request.with_analysis_actions(actions);
    }
    if let Some(recommendations) = body.analysis_recommendations {
        request = request.with_analysis_recommendations(recommendations);
    }
    Ok(Json(state.records.update_record(request).await?))
}

/// `DELETE /api/profiles/:profile_id/medical-records/:id`
pub async fn remove<S: Stores>(
    State(state): State<AppState<S>>,
    Path((raw_profile, raw_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let owner = profile_id(&raw_profile)?;
    let id = record_id(&raw_id)?;
    state.records.delete_record(owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
