//! Kanban tasks owned by a profile.
//!
//! Each profile's tasks are split into three status columns. Within a column
//! the `order` values are always exactly `0..len`: creating a task appends
//! it, deleting one closes the gap, and moving one (across columns or within
//! a column) rewrites the affected columns as a single atomic unit.
//!
//! - Domain types and the reorder planner in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
