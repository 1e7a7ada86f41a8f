//! Read model grouping a profile's tasks by column.

use super::{Task, TaskStatus};
use serde::Serialize;

/// One column of the board, tasks in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    /// Column status.
    pub status: TaskStatus,
    /// Tasks sorted by order.
    pub tasks: Vec<Task>,
}

/// A profile's tasks as three columns in fixed `todo`, `inprogress`, `done`
/// order. Empty columns are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanBoard {
    /// The columns.
    pub columns: Vec<BoardColumn>,
}

impl KanbanBoard {
    /// Groups tasks into columns.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut columns: Vec<BoardColumn> = TaskStatus::ALL
            .iter()
            .map(|status| BoardColumn {
                status: *status,
                tasks: Vec::new(),
            })
            .collect();
        for task in tasks {
            if let Some(column) = columns
                .iter_mut()
                .find(|column| column.status == task.status())
            {
                column.tasks.push(task);
            }
        }
        for column in &mut columns {
            column
                .tasks
                .sort_by_key(|task| (task.order(), task.created_at(), task.id()));
        }
        Self { columns }
    }

    /// Returns the column for a status.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.status == status)
    }
}
