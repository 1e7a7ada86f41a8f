//! Application services for the Kanban task board.

mod board;

pub use board::{
    CreateTaskRequest, RawIndex, ReorderTaskRequest, TaskBoardService, TaskServiceError,
    TaskServiceResult, UpdateTaskRequest,
};
