//! Profile endpoints.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use super::parse_uuid;
use crate::api::error::ApiError;
use crate::api::state::{AppState, Stores};
use crate::profile::domain::{Profile, ProfileId};
use crate::profile::services::{CreateProfileRequest, ProfileOverview, UpdateProfileRequest};

/// Body of `POST /api/profiles`.
#[derive(Debug, Deserialize)]
pub struct CreateProfileBody {
    /// Display name.
    pub name: String,
    /// Relationship label.
    #[serde(default)]
    pub relationship: String,
}

/// Body of `PATCH /api/profiles/:profile_id`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileBody {
    /// New display name.
    pub name: Option<String>,
    /// New relationship label.
    pub relationship: Option<String>,
}

pub(crate) fn profile_id(raw: &str) -> Result<ProfileId, ApiError> {
    parse_uuid(raw, "profile_id").map(ProfileId::from_uuid)
}

/// `GET /api/profiles`
pub async fn list<S: Stores>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    Ok(Json(state.profiles.list_profiles().await?))
}

/// `POST /api/profiles`
pub async fn create<S: Stores>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateProfileBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let Json(body) = payload?;
    let request = CreateProfileRequest::new(body.name).with_relationship(body.relationship);
    let profile = state.profiles.create_profile(request).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// `GET /api/profiles/:profile_id`
pub async fn detail<S: Stores>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProfileOverview>, ApiError> {
    let id = profile_id(&raw_id)?;
    Ok(Json(state.profiles.profile_overview(id).await?))
}

/// `PATCH /api/profiles/:profile_id`
pub async fn update<S: Stores>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateProfileBody>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    let id = profile_id(&raw_id)?;
    let Json(body) = payload?;
    let mut request = UpdateProfileRequest::new(id);
    if let Some(name) = body.name {
        request = request.with_name(name);
    }
    if let Some(relationship) = body.relationship {
        request = request.with_relationship(relationship);
    }
    Ok(Json(state.profiles.update_profile(request).await?))
}

/// `DELETE /api/profiles/:profile_id`
pub async fn remove<S: Stores>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = profile_id(&raw_id)?;
    state.profiles.delete_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
