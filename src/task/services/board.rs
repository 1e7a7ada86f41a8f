//! Service layer for task CRUD and Kanban reordering.

use crate::error::ErrorKind;
use crate::profile::{
    domain::ProfileId,
    ports::{ProfileRepository, ProfileRepositoryError},
};
use crate::task::{
    domain::{
        ColumnIndex, KanbanBoard, Task, TaskDomainError, TaskDraft, TaskId, TaskPatch, TaskStatus,
        TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Target index exactly as it arrived in a request.
///
/// Clients send either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawIndex {
    /// Integer form.
    Number(i64),
    /// Integer form above `i64::MAX`.
    Unsigned(u64),
    /// Text form, parsed on validation.
    Text(String),
}

impl RawIndex {
    fn parse(&self) -> Result<ColumnIndex, TaskDomainError> {
        match self {
            Self::Number(value) => ColumnIndex::new(*value),
            Self::Unsigned(value) => Ok(ColumnIndex::from(*value)),
            Self::Text(text) => ColumnIndex::parse(text),
        }
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    profile_id: ProfileId,
    title: String,
    description: Option<String>,
    status: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request for a `todo` task with the given title.
    #[must_use]
    pub fn new(profile_id: ProfileId, title: impl Into<String>) -> Self {
        Self {
            profile_id,
            title: title.into(),
            description: None,
            status: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status column.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Request payload for a partial task update, including moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    profile_id: ProfileId,
    task_id: TaskId,
    title: Option<String>,
    description: Option<Option<String>>,
    status: Option<String>,
    index: Option<RawIndex>,
}

impl UpdateTaskRequest {
    /// Creates an update that changes nothing until fields are set.
    #[must_use]
    pub const fn new(profile_id: ProfileId, task_id: TaskId) -> Self {
        Self {
            profile_id,
            task_id,
            title: None,
            description: None,
            status: None,
            index: None,
        }
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces (`Some`) or clears (`None`) the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Requests a status column.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Requests a target index in the destination column.
    #[must_use]
    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(RawIndex::Number(index));
        self
    }

    /// Requests a target index given as text.
    #[must_use]
    pub fn with_raw_index(mut self, index: RawIndex) -> Self {
        self.index = Some(index);
        self
    }

    fn into_patch(self) -> Result<(ProfileId, TaskId, TaskPatch), TaskDomainError> {
        let title = self.title.map(TaskTitle::new).transpose()?;
        let status = self
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?;
        let index = self.index.as_ref().map(RawIndex::parse).transpose()?;
        let patch = TaskPatch {
            title,
            description: self.description,
            status,
            index,
        };
        Ok((self.profile_id, self.task_id, patch))
    }
}

/// Request payload for moving a task without editing its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderTaskRequest {
    inner: UpdateTaskRequest,
}

impl ReorderTaskRequest {
    /// Creates a move of the task to `status`.
    #[must_use]
    pub fn new(profile_id: ProfileId, task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            inner: UpdateTaskRequest::new(profile_id, task_id).with_status(status),
        }
    }

    /// Sets the target index.
    #[must_use]
    pub fn with_index(mut self, index: i64) -> Self {
        self.inner = self.inner.with_index(index);
        self
    }

    /// Sets the target index from raw request input.
    #[must_use]
    pub fn with_raw_index(mut self, index: RawIndex) -> Self {
        self.inner = self.inner.with_raw_index(index);
        self
    }
}

impl From<ReorderTaskRequest> for UpdateTaskRequest {
    fn from(request: ReorderTaskRequest) -> Self {
        request.inner
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Request validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The owning profile does not exist.
    #[error("profile not found: {0}")]
    ProfileNotFound(ProfileId),
    /// The task does not exist under the profile.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Profile lookup failed.
    #[error(transparent)]
    Profiles(#[from] ProfileRepositoryError),
}

impl TaskServiceError {
    /// Classifies the error for API mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::InvalidArgument,
            Self::ProfileNotFound(_)
            | Self::NotFound(_)
            | Self::Repository(
                TaskRepositoryError::NotFound(_) | TaskRepositoryError::ProfileNotFound(_),
            )
            | Self::Profiles(ProfileRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(
                TaskRepositoryError::DuplicateTitle { .. } | TaskRepositoryError::DuplicateTask(_),
            )
            | Self::Profiles(ProfileRepositoryError::DuplicateProfile(_)) => ErrorKind::Conflict,
            Self::Repository(TaskRepositoryError::Persistence(_))
            | Self::Profiles(ProfileRepositoryError::Persistence(_)) => ErrorKind::Internal,
        }
    }

    /// Returns the request field the error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Domain(err) => Some(err.field()),
            Self::Repository(TaskRepositoryError::DuplicateTitle { .. }) => Some("title"),
            _ => None,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Kanban task orchestration service.
#[derive(Clone)]
pub struct TaskBoardService<P, T, C>
where
    P: ProfileRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    profiles: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<P, T, C> TaskBoardService<P, T, C>
where
    P: ProfileRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task board service.
    #[must_use]
    pub const fn new(profiles: Arc<P>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            profiles,
            tasks,
            clock,
        }
    }

    /// Creates a task at the end of its status column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an invalid title or status,
    /// [`TaskServiceError::ProfileNotFound`] when the profile is absent, and
    /// a repository duplicate-title error when the profile already has a
    /// task with a matching title.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let status = request
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()
            .map_err(TaskDomainError::from)?
            .unwrap_or_default();
        self.ensure_profile(request.profile_id).await?;

        let draft = TaskDraft::new(
            request.profile_id,
            title,
            request.description,
            status,
            &*self.clock,
        );
        let task = self.tasks.append(&draft).await?;
        tracing::debug!(
            profile_id = %task.profile_id(),
            task_id = %task.id(),
            status = %task.status(),
            order = %task.order(),
            "task created"
        );
        Ok(task)
    }

    /// Fetches a task owned by the profile.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent or
    /// owned by another profile.
    pub async fn get_task(&self, profile_id: ProfileId, task_id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(profile_id, task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))
    }

    /// Lists the profile's tasks ordered by status then order, optionally
    /// restricted to one column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProfileNotFound`] when the profile is
    /// absent.
    pub async fn list_tasks(
        &self,
        profile_id: ProfileId,
        status: Option<TaskStatus>,
    ) -> TaskServiceResult<Vec<Task>> {
        self.ensure_profile(profile_id).await?;
        let tasks = match status {
            Some(column) => self.tasks.list_by_profile_status(profile_id, column).await?,
            None => self.tasks.list_by_profile(profile_id).await?,
        };
        Ok(tasks)
    }

    /// Returns the profile's tasks grouped into the three board columns.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProfileNotFound`] when the profile is
    /// absent.
    pub async fn board(&self, profile_id: ProfileId) -> TaskServiceResult<KanbanBoard> {
        let tasks = self.list_tasks(profile_id, None).await?;
        Ok(KanbanBoard::from_tasks(tasks))
    }

    /// Applies field edits and, when requested, moves the task.
    ///
    /// Every request field is validated before the store is touched, so an
    /// invalid status or index leaves all columns unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for invalid input,
    /// [`TaskServiceError::NotFound`] when the task is absent, and a
    /// repository duplicate-title error when a new title collides.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let (profile_id, task_id, patch) = request.into_patch()?;
        if patch.is_empty() {
            return self.get_task(profile_id, task_id).await;
        }

        let task = self
            .tasks
            .apply_patch(profile_id, task_id, &patch, self.clock.utc())
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(id) => TaskServiceError::NotFound(id),
                other => TaskServiceError::Repository(other),
            })?;
        tracing::info!(
            profile_id = %profile_id,
            task_id = %task_id,
            status = %task.status(),
            order = %task.order(),
            "task updated"
        );
        Ok(task)
    }

    /// Moves a task to a status column and position.
    ///
    /// # Errors
    ///
    /// See [`Self::update_task`].
    pub async fn reorder_task(&self, request: ReorderTaskRequest) -> TaskServiceResult<Task> {
        self.update_task(request.into()).await
    }

    /// Deletes a task and closes the gap in its column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is absent.
    pub async fn delete_task(&self, profile_id: ProfileId, task_id: TaskId) -> TaskServiceResult<()> {
        self.tasks
            .remove(profile_id, task_id)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(id) => TaskServiceError::NotFound(id),
                other => TaskServiceError::Repository(other),
            })?;
        tracing::debug!(profile_id = %profile_id, task_id = %task_id, "task deleted");
        Ok(())
    }

    async fn ensure_profile(&self, profile_id: ProfileId) -> TaskServiceResult<()> {
        if self.profiles.exists(profile_id).await? {
            Ok(())
        } else {
            Err(TaskServiceError::ProfileNotFound(profile_id))
        }
    }
}
