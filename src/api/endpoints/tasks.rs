//! Task and Kanban board endpoints, scoped to a profile.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::profiles::profile_id;
use super::{explicit_null, parse_uuid};
use crate::api::error::ApiError;
use crate::api::state::{AppState, Stores};
use crate::task::domain::{KanbanBoard, Task, TaskDomainError, TaskId, TaskStatus};
use crate::task::services::{CreateTaskRequest, RawIndex, UpdateTaskRequest};

/// Query of `GET /api/profiles/:profile_id/tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Restricts the listing to one status column.
    pub status: Option<String>,
}

/// Body of `POST /api/profiles/:profile_id/tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    /// Task title; must be unique within the profile, ignoring case.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Initial status column; defaults to `todo`.
    pub status: Option<String>,
}

/// Body of `PATCH /api/profiles/:profile_id/tasks/:task_id`.
///
/// `order` is the target position in the destination column after the move,
/// given as a JSON integer or a numeric string.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskBody {
    /// New title.
    pub title: Option<String>,
    /// Description change; `null` clears it.
    #[serde(default, deserialize_with = "explicit_null")]
    pub description: Option<Option<String>>,
    /// Requested status column.
    pub status: Option<String>,
    /// Requested target index.
    pub order: Option<Value>,
}

fn task_id(raw: &str) -> Result<TaskId, ApiError> {
    parse_uuid(raw, "task_id").map(TaskId::from_uuid)
}

fn raw_index(value: Value) -> Option<RawIndex> {
    match value {
        Value::Null => None,
        Value::Number(number) => Some(
            number
                .as_i64()
                .map(RawIndex::Number)
                .or_else(|| number.as_u64().map(RawIndex::Unsigned))
                .unwrap_or_else(|| RawIndex::Text(number.to_string())),
        ),
        Value::String(text) => Some(RawIndex::Text(text)),
        other => Some(RawIndex::Text(other.to_string())),
    }
}

/// `GET /api/profiles/:profile_id/tasks[?status=]`
pub async fn list<S: Stores>(
    State(state): State<AppState<S>>,
    Path(raw_profile): Path<String>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let owner = profile_id(&raw_profile)?;
    let Query(filter) = query?;
    let status = filter
        .status
        .as_deref()
        .map(TaskStatus::try_from)
        .transpose()
        .map_err(|err| {
            let domain = TaskDomainError::from(err);
            ApiError::invalid_field(domain.field(), domain.to_string())
        })?;
    Ok(Json(state.tasks.list_tasks(owner, status).await?))
}

/// `GET /api/profiles/:profile_id/tasks/board`
pub async fn board<S: Stores>(
    State(state): State<AppState<S>>,
    Path(raw_profile): Path<String>,
) -> Result<Json<KanbanBoard>, ApiError> {
    let owner = profile_id(&raw_profile)?;
    Ok(Json(state.tasks.board(owner).await?))
}

/// `POST /api/profiles/:profile_id/tasks`
pub async fn create<S: Stores>(
    State(state): State<AppState<S>>,
    Path(raw_profile): Path<String>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let owner = profile_id(&raw_profile)?;
    let Json(body) = payload?;
    let mut request = CreateTaskRequest::new(owner, body.title);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(status) = body.status {
        request = request.with_status(status);
    }
    let task = state.tasks.create_task(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /api/profiles/:profile_id/tasks/:task_id`
pub async fn detail<S: Stores>(
    State(state): State<AppState<S>>,
    Path((raw_profile, raw_task)): Path<(String, String)>,
) -> Result<Json<Task>, ApiError> {
    let owner = profile_id(&raw_profile)?;
    let id = task_id(&raw_task)?;
    Ok(Json(state.tasks.get_task(owner, id).await?))
}

/// `PATCH /api/profiles/:profile_id/tasks/:task_id`
///
/// Applies field edits and, when `status` changes or `order` is given, moves
/// the task.
pub async fn update<S: Stores>(
    State(state): State<AppState<S>>,
    Path((raw_profile, raw_task)): Path<(String, String)>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let owner = profile_id(&raw_profile)?;
    let id = task_id(&raw_task)?;
    let Json(body) = payload?;

    let mut request = UpdateTaskRequest::new(owner, id);
    if let Some(title) = body.title {
        request = request.with_title(title);
    }
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(status) = body.status {
        request = request.with_status(status);
    }
    if let Some(index) = body.order.and_then(raw_index) {
        request = request.with_raw_index(index);
    }
    Ok(Json(state.tasks.update_task(request).await?))
}

/// `DELETE /api/profiles/:profile_id/tasks/:task_id`
pub async fn remove<S: Stores>(
    State(state): State<AppState<S>>,
    Path((raw_profile, raw_task)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let owner = profile_id(&raw_profile)?;
    let id = task_id(&raw_task)?;
    state.tasks.delete_task(owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
