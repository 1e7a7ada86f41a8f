//! Domain model for profiles.

mod error;
mod ids;
mod profile;

pub use error::ProfileDomainError;
pub use ids::{ProfileId, ProfileName, Relationship};
pub use profile::{PersistedProfileData, Profile};
