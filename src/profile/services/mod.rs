//! Application services for profile management.

mod directory;

pub use directory::{
    CreateProfileRequest, ProfileOverview, ProfileService, ProfileServiceError,
    ProfileServiceResult, UpdateProfileRequest,
};
