//! Domain model for Kanban tasks.
//!
//! The only shared mutable state in this domain is the order sequence of a
//! `(profile, status)` column. [`StatusColumn`] models that sequence as an
//! ordered list, and [`plan_move`] / [`plan_removal`] turn list edits into
//! the minimal set of row assignments a store has to write.

mod board;
mod column;
mod error;
mod ids;
mod reorder;
mod status;
mod task;

pub use board::{BoardColumn, KanbanBoard};
pub use column::StatusColumn;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{ColumnIndex, TaskId, TaskOrder, TaskTitle};
pub use reorder::{MoveTarget, OrderAssignment, ReorderPlan, plan_move, plan_removal};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch};
