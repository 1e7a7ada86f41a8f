//! Repository port for task persistence and column maintenance.

use crate::profile::domain::ProfileId;
use crate::task::domain::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// `append`, `apply_patch`, and `remove` are read-modify-write units: each
/// reads the affected columns, plans the writes, and applies them atomically,
/// serialized against other writers on the same profile. A failure leaves
/// every column exactly as it was.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a draft at the end of its status column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTitle`] when the profile
    /// already has a task whose title matches case-insensitively, and
    /// [`TaskRepositoryError::ProfileNotFound`] when the backend can tell the
    /// profile is missing.
    async fn append(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task>;

    /// Finds a task owned by the profile.
    async fn find_by_id(
        &self,
        profile_id: ProfileId,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the profile's tasks ordered by status, then order.
    async fn list_by_profile(&self, profile_id: ProfileId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns one column of the profile's tasks in order.
    async fn list_by_profile_status(
        &self,
        profile_id: ProfileId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Applies field edits and, when the patch resolves to a move, the
    /// reorder plan. Returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// under the profile and [`TaskRepositoryError::DuplicateTitle`] when a
    /// new title collides with another task of the profile.
    async fn apply_patch(
        &self,
        profile_id: ProfileId,
        id: TaskId,
        patch: &TaskPatch,
        touched_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Deletes a task and closes the gap it leaves in its column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// under the profile.
    async fn remove(&self, profile_id: ProfileId, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The profile already has a task with a matching title.
    #[error("a task titled '{title}' already exists for profile {profile_id}")]
    DuplicateTitle {
        /// Profile owning both tasks.
        profile_id: ProfileId,
        /// The rejected title.
        title: String,
    },

    /// The task was not found under the profile.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The owning profile does not exist.
    #[error("profile not found: {0}")]
    ProfileNotFound(ProfileId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
