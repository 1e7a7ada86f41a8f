//! `PostgreSQL` repository implementation for tasks.
//!
//! Column rewrites run inside one transaction that first takes the owning
//! profile's row lock, so two writers on the same profile never interleave
//! their read and write steps.

use super::{
    models::{TaskDetailsChangeset, TaskRow},
    schema::tasks,
};
use crate::db::{PgPool, lock_profile};
use crate::profile::domain::ProfileId;
use crate::task::{
    domain::{
        OrderAssignment, PersistedTaskData, Task, TaskDraft, TaskId, TaskOrder, TaskPatch,
        TaskStatus, TaskTitle, plan_move, plan_removal,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn append(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let pending = draft.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let profile_id = pending.profile_id();
                if !lock_profile(tx, profile_id.into_inner())? {
                    return Err(TaskRepositoryError::ProfileNotFound(profile_id));
                }
                let peers = load_profile_tasks(tx, profile_id)?;
                ensure_unique_title(&peers, profile_id, pending.title(), None)?;

                let column_length = peers
                    .iter()
                    .filter(|task| task.status() == pending.status())
                    .count();
                let task = pending.into_task(TaskOrder::from_index(column_length));
                let row = to_row(&task)?;
                diesel::insert_into(tasks::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task.id())
                        }
                        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                            TaskRepositoryError::ProfileNotFound(profile_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                Ok(task)
            })
        })
        .await
    }

    async fn find_by_id(
        &self,
        profile_id: ProfileId,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::profile_id.eq(profile_id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?
                .map(row_to_task)
                .transpose()
        })
        .await
    }

    async fn list_by_profile(&self, profile_id: ProfileId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| load_profile_tasks(connection, profile_id))
            .await
    }

    async fn list_by_profile_status(
        &self,
        profile_id: ProfileId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::profile_id.eq(profile_id.into_inner()))
                .filter(tasks::status.eq(status.as_str()))
                .order((
                    tasks::position.asc(),
                    tasks::created_at.asc(),
                    tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn apply_patch(
        &self,
        profile_id: ProfileId,
        id: TaskId,
        patch: &TaskPatch,
        touched_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let edits = patch.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                if !lock_profile(tx, profile_id.into_inner())? {
                    return Err(TaskRepositoryError::NotFound(id));
                }
                let peers = load_profile_tasks(tx, profile_id)?;
                let current = peers
                    .iter()
                    .find(|task| task.id() == id)
                    .cloned()
                    .ok_or(TaskRepositoryError::NotFound(id))?;
                if let Some(title) = &edits.title {
                    ensure_unique_title(&peers, profile_id, title, Some(id))?;
                }

                let mut updated = current.clone();
                updated.apply_details(&edits);
                if let Some(target) = edits.move_target(&current) {
                    let plan = plan_move(&current, &peers, target);
                    write_assignments(tx, plan.shifted())?;
                    let moved = plan.moved();
                    updated.place(moved.status, moved.order);
                }
                updated.touch_at(touched_at);

                diesel::update(tasks::table.find(id.into_inner()))
                    .set(&TaskDetailsChangeset {
                        title: updated.title().as_str().to_owned(),
                        description: updated.description().map(str::to_owned),
                        status: updated.status().as_str().to_owned(),
                        position: to_position(updated.order())?,
                        updated_at: updated.updated_at(),
                    })
                    .execute(tx)?;
                Ok(updated)
            })
        })
        .await
    }

    async fn remove(&self, profile_id: ProfileId, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                if !lock_profile(tx, profile_id.into_inner())? {
                    return Err(TaskRepositoryError::NotFound(id));
                }
                let peers = load_profile_tasks(tx, profile_id)?;
                let task = peers
                    .iter()
                    .find(|task| task.id() == id)
                    .ok_or(TaskRepositoryError::NotFound(id))?;
                let closing = plan_removal(task, &peers);
                diesel::delete(tasks::table.find(id.into_inner())).execute(tx)?;
                write_assignments(tx, &closing)?;
                Ok(())
            })
        })
        .await
    }
}

fn load_profile_tasks(
    connection: &mut PgConnection,
    profile_id: ProfileId,
) -> TaskRepositoryResult<Vec<Task>> {
    let rows = tasks::table
        .filter(tasks::profile_id.eq(profile_id.into_inner()))
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)?;
    let mut loaded = rows
        .into_iter()
        .map(row_to_task)
        .collect::<TaskRepositoryResult<Vec<_>>>()?;
    loaded.sort_by_key(|task| (task.status(), task.order(), task.created_at(), task.id()));
    Ok(loaded)
}

fn ensure_unique_title(
    peers: &[Task],
    profile_id: ProfileId,
    title: &TaskTitle,
    except: Option<TaskId>,
) -> TaskRepositoryResult<()> {
    let collides = peers
        .iter()
        .any(|task| Some(task.id()) != except && title.collides_with(task.title().as_str()));
    if collides {
        return Err(TaskRepositoryError::DuplicateTitle {
            profile_id,
            title: title.as_str().to_owned(),
        });
    }
    Ok(())
}

fn write_assignments(
    connection: &mut PgConnection,
    assignments: &[OrderAssignment],
) -> TaskRepositoryResult<()> {
    for assignment in assignments {
        diesel::update(tasks::table.find(assignment.task_id.into_inner()))
            .set((
                tasks::status.eq(assignment.status.as_str()),
                tasks::position.eq(to_position(assignment.order)?),
            ))
            .execute(connection)?;
    }
    Ok(())
}

fn to_position(order: TaskOrder) -> TaskRepositoryResult<i32> {
    i32::try_from(order.value()).map_err(TaskRepositoryError::persistence)
}

fn to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    Ok(TaskRow {
        id: task.id().into_inner(),
        profile_id: task.profile_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        position: to_position(task.order())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let order = u32::try_from(row.position)
        .map(TaskOrder::new)
        .map_err(TaskRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        profile_id: ProfileId::from_uuid(row.profile_id),
        title,
        description: row.description,
        status,
        order,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
