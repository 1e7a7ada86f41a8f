//! In-memory profile adapters.

mod profile;

pub use profile::{InMemoryProfileRepository, ProfileOwnedRows, ProfileTable, PurgeRows};
