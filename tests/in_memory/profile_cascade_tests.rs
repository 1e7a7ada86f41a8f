//! In-memory integration tests for profile ownership and cascading deletes.

#![expect(
    clippy::panic_in_result_fn,
    reason = "Tests use assertions for verification while returning Result for error propagation"
)]

use std::sync::Arc;

use crate::in_memory::helpers::{MemoryState, seed_profile, seed_tasks, state};
use chrono::NaiveDate;
use healthboard::api::{AppState, InMemoryRepositories};
use healthboard::error::ErrorKind;
use healthboard::record::{ports::MedicalRecordRepository, services::CreateRecordRequest};
use healthboard::task::{
    domain::TaskStatus, ports::TaskRepository, services::CreateTaskRequest,
};
use rstest::rstest;

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| eyre::eyre!("invalid date"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_profile_removes_only_its_data(
    state: MemoryState,
) -> Result<(), eyre::Report> {
    let doomed = seed_profile(&state, "Ada").await?;
    let kept = seed_profile(&state, "Grace").await?;
    for owner in [doomed, kept] {
        seed_tasks(&state, owner, TaskStatus::Todo, &["Refill"]).await?;
        state
            .records
            .create_record(CreateRecordRequest::new(owner, "Blood panel", date(2026, 3, 14)?))
            .await?;
    }

    state.profiles.delete_profile(doomed).await?;

    let err = state
        .tasks
        .list_tasks(doomed, None)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected listing a deleted profile to fail"))?;
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(state.tasks.list_tasks(kept, None).await?.len(), 1);
    assert_eq!(state.records.list_records(kept).await?.len(), 1);

    let profiles = state.profiles.list_profiles().await?;
    assert_eq!(profiles.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recreating_a_title_after_profile_deletion_is_allowed(
    state: MemoryState,
) -> Result<(), eyre::Report> {
    let first = seed_profile(&state, "Ada").await?;
    seed_tasks(&state, first, TaskStatus::Todo, &["Refill"]).await?;
    state.profiles.delete_profile(first).await?;

    let second = seed_profile(&state, "Ada").await?;
    let task = state
        .tasks
        .create_task(CreateTaskRequest::new(second, "Refill"))
        .await?;
    assert_eq!(task.order().value(), 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overview_lists_records_newest_first(state: MemoryState) -> Result<(), eyre::Report> {
    let owner = seed_profile(&state, "Ada").await?;
    for (title, when) in [
        ("January", date(2026, 1, 5)?),
        ("March", date(2026, 3, 1)?),
        ("February", date(2026, 2, 9)?),
    ] {
        state
            .records
            .create_record(CreateRecordRequest::new(owner, title, when))
            .await?;
    }

    let overview = state.profiles.profile_overview(owner).await?;
    let titles: Vec<&str> = overview
        .medical_records
        .iter()
        .map(|record| record.title().as_str())
        .collect();
    assert_eq!(titles, ["March", "February", "January"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn writes_for_missing_profiles_are_not_found(
    state: MemoryState,
) -> Result<(), eyre::Report> {
    let missing = healthboard::profile::domain::ProfileId::new();

    let task_err = state
        .tasks
        .create_task(CreateTaskRequest::new(missing, "Refill"))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected task creation to fail"))?;
    let record_err = state
        .records
        .create_record(CreateRecordRequest::new(missing, "Scan", date(2026, 1, 1)?))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected record creation to fail"))?;
    let delete_err = state
        .profiles
        .delete_profile(missing)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected profile deletion to fail"))?;

    assert_eq!(task_err.kind(), ErrorKind::NotFound);
    assert_eq!(record_err.kind(), ErrorKind::NotFound);
    assert_eq!(delete_err.kind(), ErrorKind::NotFound);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creates_racing_a_profile_delete_leave_no_orphans() -> Result<(), eyre::Report> {
    let repositories = InMemoryRepositories::new();
    let state: MemoryState = AppState::from_repositories(
        Arc::clone(&repositories.profiles),
        Arc::clone(&repositories.records),
        Arc::clone(&repositories.tasks),
    );
    let doomed = seed_profile(&state, "Ada").await?;
    let when = date(2026, 4, 1)?;

    let handles: Vec<_> = (0..24)
        .map(|n| {
            let tasks = state.tasks.clone();
            let records = state.records.clone();
            tokio::spawn(async move {
                let task = tasks
                    .create_task(CreateTaskRequest::new(doomed, format!("Task {n}")))
                    .await;
                let record = records
                    .create_record(CreateRecordRequest::new(doomed, format!("Scan {n}"), when))
                    .await;
                (task.is_ok(), record.is_ok())
            })
        })
        .collect();
    state.profiles.delete_profile(doomed).await?;
    for handle in handles {
        handle.await?;
    }

    assert!(repositories.tasks.list_by_profile(doomed).await?.is_empty());
    assert!(repositories.records.list_by_profile(doomed).await?.is_empty());
    Ok(())
}
