//! HTTP surface for profiles, medical records, and the Kanban board.
//!
//! Routes are nested under `/api/`. Handlers parse and validate path
//! identifiers and JSON bodies, call the services held by [`AppState`], and
//! translate service errors into structured bodies via [`ApiError`].

pub mod endpoints;
pub mod error;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorBody, ErrorDetail};
pub use router::router;
pub use state::{AppState, InMemoryRepositories, InMemoryStores, PostgresStores, Stores};
