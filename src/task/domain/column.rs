//! Ordered-list view of one `(profile, status)` column.

use super::{Task, TaskId, TaskOrder, TaskStatus};

/// The tasks of one status column as an ordered list.
///
/// Positions are list indices, so the column is contiguous and zero-based by
/// construction; [`StatusColumn::orders`] yields the order value each task
/// should carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusColumn {
    status: TaskStatus,
    entries: Vec<TaskId>,
}

impl StatusColumn {
    /// Creates an empty column.
    #[must_use]
    pub const fn new(status: TaskStatus) -> Self {
        Self {
            status,
            entries: Vec::new(),
        }
    }

    /// Builds the column from the tasks that carry `status`.
    ///
    /// Tasks are ranked by `(order, created_at, id)`, so stored orders with
    /// gaps or duplicates still produce a deterministic, contiguous list.
    pub fn from_tasks<'a>(status: TaskStatus, tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut members: Vec<&Task> = tasks
            .into_iter()
            .filter(|task| task.status() == status)
            .collect();
        members.sort_by_key(|task| (task.order(), task.created_at(), task.id()));
        Self {
            status,
            entries: members.into_iter().map(Task::id).collect(),
        }
    }

    /// Returns the column status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the task identifiers in column order.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.entries
    }

    /// Returns the position of a task, if it is in the column.
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.entries.iter().position(|entry| *entry == id)
    }

    /// Removes a task, shifting every later task up by one.
    ///
    /// Returns the position the task occupied.
    pub fn remove(&mut self, id: TaskId) -> Option<usize> {
        let position = self.position(id)?;
        self.entries.remove(position);
        Some(position)
    }

    /// Inserts a task at `index`, shifting the task there and every later
    /// task down by one. Indices past the end append.
    ///
    /// Returns the position the task landed at.
    pub fn insert_at(&mut self, index: usize, id: TaskId) -> usize {
        let slot = index.min(self.entries.len());
        self.entries.insert(slot, id);
        slot
    }

    /// Appends a task and returns its position.
    pub fn push(&mut self, id: TaskId) -> usize {
        self.entries.push(id);
        self.entries.len() - 1
    }

    /// Returns the order value each task in the column should carry.
    pub fn orders(&self) -> impl Iterator<Item = (TaskId, TaskOrder)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, TaskOrder::from_index(index)))
    }
}
