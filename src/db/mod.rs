//! Shared `PostgreSQL` plumbing for the Diesel adapters.
//!
//! Each bounded context keeps its own schema and row models; this module only
//! owns the pool type, schema bootstrap, and the per-profile write lock that
//! serializes column rewrites.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use uuid::Uuid;

/// `PostgreSQL` connection pool shared by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent schema bootstrap applied at startup and by integration tests.
pub const SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_health_tables/up.sql");

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot establish its initial
/// connections.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// Applies [`SCHEMA_SQL`] on the given connection.
///
/// # Errors
///
/// Returns the Diesel error raised by the batch execution.
pub fn apply_schema(connection: &mut PgConnection) -> QueryResult<()> {
    connection.batch_execute(SCHEMA_SQL)
}

#[derive(QueryableByName)]
struct LockedProfile {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    id: Uuid,
}

/// Takes a row lock on the profile for the rest of the enclosing transaction.
///
/// Every write that rewrites a status column goes through this lock first, so
/// concurrent writers on one profile queue up while other profiles proceed.
/// Returns `false` when the profile does not exist.
pub(crate) fn lock_profile(connection: &mut PgConnection, profile_id: Uuid) -> QueryResult<bool> {
    let locked = diesel::sql_query("SELECT id FROM profiles WHERE id = $1 FOR UPDATE")
        .bind::<diesel::sql_types::Uuid, _>(profile_id)
        .get_result::<LockedProfile>(connection)
        .optional()?;
    Ok(locked.is_some_and(|row| row.id == profile_id))
}
