//! Unit tests for the task module.
//!
//! Tests are organised by concept: value types, the column list, the reorder
//! planner, and service orchestration over the in-memory adapter.
