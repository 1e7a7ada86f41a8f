//! Profiles: the family members and patients that own medical records and
//! Kanban tasks.
//!
//! Deleting a profile cascades to everything it owns. The module follows
//! the same hexagonal layout as the rest of the crate:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
