//! In-memory repository for tasks.
//!
//! One `RwLock` guards the whole store, so every mutating call holds the
//! write guard across its read, plan, and write steps. A store built with
//! [`InMemoryTaskRepository::owned_by`] appends only while the owning
//! profile is present in the shared table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::profile::{
    adapters::memory::{ProfileOwnedRows, ProfileTable, PurgeRows},
    domain::ProfileId,
    ports::{ProfileRepositoryError, ProfileRepositoryResult},
};
use crate::task::{
    domain::{
        OrderAssignment, Task, TaskDraft, TaskId, TaskOrder, TaskPatch, TaskStatus, TaskTitle,
        plan_move, plan_removal,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
    owners: Option<ProfileTable>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository that trusts callers to check
    /// profile existence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository whose tasks belong to profiles in `owners`.
    #[must_use]
    pub fn owned_by(owners: ProfileTable) -> Self {
        Self {
            state: Arc::default(),
            owners: Some(owners),
        }
    }

    fn insert(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&draft.id()) {
            return Err(TaskRepositoryError::DuplicateTask(draft.id()));
        }
        ensure_unique_title(&state, draft.profile_id(), draft.title(), None)?;

        let column_length = state
            .values()
            .filter(|task| task.profile_id() == draft.profile_id() && task.status() == draft.status())
            .count();
        let task = draft.clone().into_task(TaskOrder::from_index(column_length));
        state.insert(task.id(), task.clone());
        Ok(task)
    }
}

struct LockedTasks<'a>(RwLockWriteGuard<'a, HashMap<TaskId, Task>>);

impl PurgeRows for LockedTasks<'_> {
    fn purge(&mut self, profile_id: ProfileId) -> u64 {
        let before = self.0.len();
        self.0.retain(|_, task| task.profile_id() != profile_id);
        u64::try_from(before.saturating_sub(self.0.len())).unwrap_or(u64::MAX)
    }
}

impl ProfileOwnedRows for InMemoryTaskRepository {
    fn lock_rows(&self) -> ProfileRepositoryResult<Box<dyn PurgeRows + '_>> {
        let state = self.state.write().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Box::new(LockedTasks(state)))
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn profile_tasks(state: &HashMap<TaskId, Task>, profile_id: ProfileId) -> Vec<Task> {
    let mut tasks: Vec<Task> = state
        .values()
        .filter(|task| task.profile_id() == profile_id)
        .cloned()
        .collect();
    tasks.sort_by_key(|task| (task.status(), task.order(), task.created_at(), task.id()));
    tasks
}

fn ensure_unique_title(
    state: &HashMap<TaskId, Task>,
    profile_id: ProfileId,
    title: &TaskTitle,
    except: Option<TaskId>,
) -> TaskRepositoryResult<()> {
    let collides = state.values().any(|task| {
        task.profile_id() == profile_id
            && Some(task.id()) != except
            && title.collides_with(task.title().as_str())
    });
    if collides {
        return Err(TaskRepositoryError::DuplicateTitle {
            profile_id,
            title: title.as_str().to_owned(),
        });
    }
    Ok(())
}

fn apply_assignments(state: &mut HashMap<TaskId, Task>, assignments: &[OrderAssignment]) {
    for assignment in assignments {
        if let Some(task) = state.get_mut(&assignment.task_id) {
            task.place(assignment.status, assignment.order);
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn append(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let Some(owners) = &self.owners else {
            return self.insert(draft);
        };
        owners
            .while_present(draft.profile_id(), || self.insert(draft))
            .map_err(TaskRepositoryError::persistence)?
            .unwrap_or_else(|| Err(TaskRepositoryError::ProfileNotFound(draft.profile_id())))
    }

    async fn find_by_id(
        &self,
        profile_id: ProfileId,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .get(&id)
            .filter(|task| task.profile_id() == profile_id)
            .cloned())
    }

    async fn list_by_profile(&self, profile_id: ProfileId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(profile_tasks(&state, profile_id))
    }

    async fn list_by_profile_status(
        &self,
        profile_id: ProfileId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(profile_tasks(&state, profile_id)
            .into_iter()
            .filter(|task| task.status() == status)
            .collect())
    }

    async fn apply_patch(
        &self,
        profile_id: ProfileId,
        id: TaskId,
        patch: &TaskPatch,
        touched_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        let current = state
            .get(&id)
            .filter(|task| task.profile_id() == profile_id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))?;
        if let Some(title) = &patch.title {
            ensure_unique_title(&state, profile_id, title, Some(id))?;
        }

        let mut updated = current.clone();
        updated.apply_details(patch);
        if let Some(target) = patch.move_target(&current) {
            let peers = profile_tasks(&state, profile_id);
            let plan = plan_move(&current, &peers, target);
            apply_assignments(&mut state, plan.shifted());
            let moved = plan.moved();
            updated.place(moved.status, moved.order);
        }
        updated.touch_at(touched_at);
        state.insert(id, updated.clone());
        Ok(updated)
    }

    async fn remove(&self, profile_id: ProfileId, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .get(&id)
            .filter(|task| task.profile_id() == profile_id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))?;
        let peers = profile_tasks(&state, profile_id);
        let closing = plan_removal(&task, &peers);
        state.remove(&id);
        apply_assignments(&mut state, &closing);
        Ok(())
    }
}
