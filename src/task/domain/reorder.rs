//! Kanban reorder planning.
//!
//! A move is remove-then-insert: the task leaves its origin column (closing
//! the gap behind it) and is inserted into the target column at the clamped
//! target index (opening a slot). When origin and target are the same
//! column both steps act on one list, so a same-column move never double
//! shifts. The plan is the diff between the stored and the rebuilt columns.

use super::{ColumnIndex, StatusColumn, Task, TaskId, TaskOrder, TaskStatus};
use std::collections::HashMap;

/// Where a task should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTarget {
    /// Destination column.
    pub status: TaskStatus,
    /// Desired position after the move; `None` appends.
    pub index: Option<ColumnIndex>,
}

impl MoveTarget {
    /// Targets a column position.
    #[must_use]
    pub const fn new(status: TaskStatus, index: Option<ColumnIndex>) -> Self {
        Self { status, index }
    }
}

/// A single row write produced by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAssignment {
    /// Task to update.
    pub task_id: TaskId,
    /// Column the task ends up in.
    pub status: TaskStatus,
    /// Position the task ends up at.
    pub order: TaskOrder,
}

/// The writes needed to apply one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    moved: OrderAssignment,
    shifted: Vec<OrderAssignment>,
}

impl ReorderPlan {
    /// Final placement of the moved task. Always written, even when it is
    /// unchanged, so the task's timestamp is refreshed.
    #[must_use]
    pub const fn moved(&self) -> OrderAssignment {
        self.moved
    }

    /// Peers whose `(status, order)` actually changes.
    #[must_use]
    pub fn shifted(&self) -> &[OrderAssignment] {
        &self.shifted
    }

    /// Every write in the plan, moved task last.
    pub fn assignments(&self) -> impl Iterator<Item = OrderAssignment> + '_ {
        self.shifted
            .iter()
            .copied()
            .chain(std::iter::once(self.moved))
    }
}

/// Plans a move of `task` to `target`.
///
/// `peers` are the stored tasks of the same profile; only those in the
/// origin and target columns matter and any copy of `task` among them is
/// ignored in favour of `task` itself.
#[must_use]
pub fn plan_move(task: &Task, peers: &[Task], target: MoveTarget) -> ReorderPlan {
    let task_id = task.id();
    let others = move || peers.iter().filter(move |peer| peer.id() != task_id);

    let mut origin = StatusColumn::from_tasks(task.status(), others().chain(std::iter::once(task)));
    origin.remove(task.id());

    let (placed, columns) = if target.status == task.status() {
        let index = target.index.map_or(origin.len(), ColumnIndex::value);
        let placed = origin.insert_at(index, task.id());
        (placed, vec![origin])
    } else {
        let mut destination = StatusColumn::from_tasks(target.status, others());
        let index = target.index.map_or(destination.len(), ColumnIndex::value);
        let placed = destination.insert_at(index, task.id());
        (placed, vec![origin, destination])
    };

    let stored: HashMap<TaskId, (TaskStatus, TaskOrder)> = others()
        .map(|peer| (peer.id(), (peer.status(), peer.order())))
        .collect();
    let shifted = columns
        .iter()
        .flat_map(|column| {
            column
                .orders()
                .filter(|(id, _)| *id != task.id())
                .filter(|(id, order)| stored.get(id) != Some(&(column.status(), *order)))
                .map(|(id, order)| OrderAssignment {
                    task_id: id,
                    status: column.status(),
                    order,
                })
                .collect::<Vec<_>>()
        })
        .collect();

    ReorderPlan {
        moved: OrderAssignment {
            task_id: task.id(),
            status: target.status,
            order: TaskOrder::from_index(placed),
        },
        shifted,
    }
}

/// Plans the writes that close the gap left by deleting `task`.
#[must_use]
pub fn plan_removal(task: &Task, peers: &[Task]) -> Vec<OrderAssignment> {
    let mut column = StatusColumn::from_tasks(
        task.status(),
        peers
            .iter()
            .filter(|peer| peer.id() != task.id())
            .chain(std::iter::once(task)),
    );
    column.remove(task.id());

    let stored: HashMap<TaskId, TaskOrder> = peers
        .iter()
        .filter(|peer| peer.status() == task.status())
        .map(|peer| (peer.id(), peer.order()))
        .collect();
    column
        .orders()
        .filter(|(id, order)| stored.get(id) != Some(order))
        .map(|(task_id, order)| OrderAssignment {
            task_id,
            status: task.status(),
            order,
        })
        .collect()
}
