//! Healthboard: family health records and Kanban task tracking.
//!
//! Profiles (family members or patients) own medical records and tasks.
//! Tasks live in three status columns whose `order` values are kept
//! gap-free and zero-based through every create, move, and delete.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration over ports, generic over the adapters
//!
//! # Modules
//!
//! - [`profile`]: Profiles and cascading deletion
//! - [`record`]: Medical records scoped to a profile
//! - [`task`]: Kanban tasks and the reorder planner
//! - [`api`]: axum HTTP surface
//! - [`config`]: Environment configuration
//! - [`db`]: Shared `PostgreSQL` pool and schema bootstrap
//! - [`error`]: Crate-wide error classification

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod profile;
pub mod record;
pub mod task;
