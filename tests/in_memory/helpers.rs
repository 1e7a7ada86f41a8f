//! Shared test helpers for in-memory integration tests.

use healthboard::api::{AppState, InMemoryStores};
use healthboard::profile::{domain::ProfileId, services::CreateProfileRequest};
use healthboard::task::{
    domain::{Task, TaskStatus},
    services::CreateTaskRequest,
};
use rstest::fixture;

/// Fully wired services over fresh in-memory repositories.
pub type MemoryState = AppState<InMemoryStores>;

/// Provides fresh services for each test.
#[fixture]
pub fn state() -> MemoryState {
    AppState::in_memory()
}

/// Creates a profile and returns its identifier.
///
/// # Errors
///
/// Returns an error if the profile cannot be created.
pub async fn seed_profile(state: &MemoryState, name: &str) -> Result<ProfileId, eyre::Report> {
    let profile = state
        .profiles
        .create_profile(CreateProfileRequest::new(name))
        .await?;
    Ok(profile.id())
}

/// Creates one task per title at the end of `status`.
///
/// # Errors
///
/// Returns an error if any task cannot be created.
pub async fn seed_tasks(
    state: &MemoryState,
    profile_id: ProfileId,
    status: TaskStatus,
    titles: &[&str],
) -> Result<Vec<Task>, eyre::Report> {
    let mut created = Vec::with_capacity(titles.len());
    for title in titles {
        let request = CreateTaskRequest::new(profile_id, *title).with_status(status.as_str());
        created.push(state.tasks.create_task(request).await?);
    }
    Ok(created)
}

/// Returns the titles of one column in order.
///
/// # Errors
///
/// Returns an error if the column cannot be listed.
pub async fn column_titles(
    state: &MemoryState,
    profile_id: ProfileId,
    status: TaskStatus,
) -> Result<Vec<String>, eyre::Report> {
    let tasks = state.tasks.list_tasks(profile_id, Some(status)).await?;
    Ok(tasks
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect())
}

/// Checks every column of a profile holds orders `0..n` with no gaps.
///
/// # Errors
///
/// Returns an error naming the first column whose orders are not contiguous.
pub async fn ensure_contiguous(
    state: &MemoryState,
    profile_id: ProfileId,
) -> Result<(), eyre::Report> {
    let board = state.tasks.board(profile_id).await?;
    for column in &board.columns {
        let orders: Vec<u32> = column.tasks.iter().map(|task| task.order().value()).collect();
        let expected: Vec<u32> = (0..).take(orders.len()).collect();
        eyre::ensure!(
            orders == expected,
            "column {} has orders {orders:?}",
            column.status
        );
    }
    Ok(())
}
