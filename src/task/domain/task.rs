//! Task aggregate and its create/update inputs.

use super::{ColumnIndex, MoveTarget, TaskId, TaskOrder, TaskStatus, TaskTitle};
use crate::profile::domain::ProfileId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A Kanban task owned by one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    profile_id: ProfileId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    order: TaskOrder,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning profile.
    pub profile_id: ProfileId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status column.
    pub status: TaskStatus,
    /// Persisted position within the column.
    pub order: TaskOrder,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            profile_id: data.profile_id,
            title: data.title,
            description: data.description,
            status: data.status,
            order: data.order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning profile.
    #[must_use]
    pub const fn profile_id(&self) -> ProfileId {
        self.profile_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the zero-based position within the status column.
    #[must_use]
    pub const fn order(&self) -> TaskOrder {
        self.order
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

    /// Moves the task to a column position. Callers are responsible for
    /// keeping the rest of the column contiguous.
    pub const fn place(&mut self, status: TaskStatus, order: TaskOrder) {
        self.status = status;
        self.order = order;
    }

    /// Applies the title and description edits of a patch. Placement is
    /// handled separately by the reorder planner.
    pub fn apply_details(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = normalize_description(description.clone());
        }
    }

    /// Sets the modification timestamp.
    pub const fn touch_at(&mut self, timestamp: DateTime<Utc>) {
        self.updated_at = timestamp;
    }
}

/// A task that has not been stored yet.
///
/// The store assigns the order: the draft is appended to the end of its
/// status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    id: TaskId,
    profile_id: ProfileId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
}

impl TaskDraft {
    /// Creates a draft stamped with the current clock time.
    #[must_use]
    pub fn new(
        profile_id: ProfileId,
        title: TaskTitle,
        description: Option<String>,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::new(),
            profile_id,
            title,
            description: normalize_description(description),
            status,
            created_at: clock.utc(),
        }
    }

    /// Returns the identifier the task will be stored under.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning profile.
    #[must_use]
    pub const fn profile_id(&self) -> ProfileId {
        self.profile_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the initial status column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Materializes the task at the given position.
    #[must_use]
    pub fn into_task(self, order: TaskOrder) -> Task {
        Task {
            id: self.id,
            profile_id: self.profile_id,
            title: self.title,
            description: self.description,
            status: self.status,
            order,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Validated partial update of a task.
///
/// `description` is tri-state: `None` keeps the current value, `Some(None)`
/// clears it, `Some(Some(_))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<TaskTitle>,
    /// Description change.
    pub description: Option<Option<String>>,
    /// Requested status column.
    pub status: Option<TaskStatus>,
    /// Requested position in the target column after the move.
    pub index: Option<ColumnIndex>,
}

impl TaskPatch {
    /// Resolves where the task should move, if anywhere.
    ///
    /// Returns `None` when the status is absent or unchanged and no index was
    /// requested: the patch is then a plain field update. A status change
    /// without an index appends the task to the destination column.
    #[must_use]
    pub fn move_target(&self, task: &Task) -> Option<MoveTarget> {
        let status = self.status.unwrap_or(task.status());
        if status == task.status() && self.index.is_none() {
            return None;
        }
        Some(MoveTarget {
            status,
            index: self.index,
        })
    }

    /// Returns whether the patch changes nothing at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.index.is_none()
    }
}

fn normalize_description(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}
