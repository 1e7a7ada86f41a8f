//! Shared test helpers for `PostgreSQL` integration tests.

use healthboard::api::{AppState, PostgresStores};
use healthboard::db::{PgPool, apply_schema, build_pool};
use healthboard::profile::{domain::ProfileId, services::CreateProfileRequest};
use healthboard::task::domain::TaskStatus;

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL_VAR: &str = "HEALTHBOARD_TEST_DATABASE_URL";

/// Pool size large enough for the concurrency tests.
const TEST_POOL_SIZE: u32 = 8;

/// Services over a live database, plus the pool for direct repository use.
pub struct PostgresContext {
    pub pool: PgPool,
    pub state: AppState<PostgresStores>,
}

/// Connects to the test database and applies the schema.
///
/// Returns `Ok(None)` when no test database is configured.
///
/// # Errors
///
/// Returns an error if the pool cannot connect or the schema fails to apply.
pub async fn connect() -> Result<Option<PostgresContext>, eyre::Report> {
    let Some(url) = std::env::var(TEST_DATABASE_URL_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
    else {
        tracing::warn!("{TEST_DATABASE_URL_VAR} unset; skipping PostgreSQL test");
        return Ok(None);
    };
    let pool = tokio::task::spawn_blocking(move || -> Result<PgPool, eyre::Report> {
        let built = build_pool(&url, TEST_POOL_SIZE)?;
        let mut connection = built.get()?;
        apply_schema(&mut connection)?;
        Ok(built)
    })
    .await??;
    let state = AppState::postgres(&pool);
    Ok(Some(PostgresContext { pool, state }))
}

/// Creates a uniquely named profile.
///
/// # Errors
///
/// Returns an error if the profile cannot be stored.
pub async fn seed_profile(context: &PostgresContext) -> Result<ProfileId, eyre::Report> {
    let name = format!("Test {}", uuid::Uuid::new_v4().simple());
    let profile = context
        .state
        .profiles
        .create_profile(CreateProfileRequest::new(name).with_relationship("self"))
        .await?;
    Ok(profile.id())
}

/// Returns the `(title, order)` pairs of one column.
///
/// # Errors
///
/// Returns an error if the column cannot be listed.
pub async fn column(
    context: &PostgresContext,
    profile_id: ProfileId,
    status: TaskStatus,
) -> Result<Vec<(String, u32)>, eyre::Report> {
    let tasks = context
        .state
        .tasks
        .list_tasks(profile_id, Some(status))
        .await?;
    Ok(tasks
        .iter()
        .map(|task| (task.title().as_str().to_owned(), task.order().value()))
        .collect())
}

/// Checks every column holds orders `0..n` with no gaps.
///
/// # Errors
///
/// Returns an error naming the first non-contiguous column.
pub async fn ensure_contiguous(
    context: &PostgresContext,
    profile_id: ProfileId,
) -> Result<(), eyre::Report> {
    for status in TaskStatus::ALL {
        let orders: Vec<u32> = column(context, profile_id, status)
            .await?
            .into_iter()
            .map(|(_, order)| order)
            .collect();
        let expected: Vec<u32> = (0..).take(orders.len()).collect();
        eyre::ensure!(orders == expected, "column {status} has orders {orders:?}");
    }
    Ok(())
}
