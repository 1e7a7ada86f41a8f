//! `PostgreSQL` integration tests.
//!
//! These run against the database named by `HEALTHBOARD_TEST_DATABASE_URL`
//! and are skipped when the variable is unset. Each test works inside its
//! own freshly created profiles, so runs can share one database.
//!
//! Tests are organized into modules by functionality:
//! - `crud_tests`: Row mapping, partial updates, and cascading deletes
//! - `task_reorder_tests`: Column rewrites under the profile row lock

mod postgres {
    pub mod helpers;

    mod crud_tests;
    mod task_reorder_tests;
}
