//! CRUD and row-mapping tests for the `PostgreSQL` adapters.

#![expect(
    clippy::panic_in_result_fn,
    reason = "Tests use assertions for verification while returning Result for error propagation"
)]

use crate::postgres::helpers::{connect, seed_profile};
use chrono::NaiveDate;
use healthboard::error::ErrorKind;
use healthboard::profile::ports::ProfileRepository;
use healthboard::profile::adapters::postgres::PostgresProfileRepository;
use healthboard::record::services::{CreateRecordRequest, UpdateRecordRequest};
use healthboard::task::{
    adapters::postgres::PostgresTaskRepository,
    ports::TaskRepository,
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_fields_survive_a_round_trip() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;

    let created = context
        .state
        .tasks
        .create_task(
            CreateTaskRequest::new(profile_id, "Book MRI")
                .with_description("Ask for the Friday slot")
                .with_status("inprogress"),
        )
        .await?;
    let fetched = context.state.tasks.get_task(profile_id, created.id()).await?;

    assert_eq!(fetched.id(), created.id());
    assert_eq!(fetched.title().as_str(), "Book MRI");
    assert_eq!(fetched.description(), Some("Ask for the Friday slot"));
    assert_eq!(fetched.status().as_str(), "inprogress");
    assert_eq!(fetched.order().value(), 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clearing_a_description_stores_null() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;
    let task = context
        .state
        .tasks
        .create_task(CreateTaskRequest::new(profile_id, "Refill").with_description("Two boxes"))
        .await?;

    let updated = context
        .state
        .tasks
        .update_task(UpdateTaskRequest::new(profile_id, task.id()).with_description(None))
        .await?;
    let fetched = context.state.tasks.get_task(profile_id, task.id()).await?;

    assert_eq!(updated.description(), None);
    assert_eq!(fetched.description(), None);
    assert!(fetched.updated_at() >= task.updated_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_titles_are_rejected_case_insensitively() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;
    context
        .state
        .tasks
        .create_task(CreateTaskRequest::new(profile_id, "Buy milk"))
        .await?;

    let err = context
        .state
        .tasks
        .create_task(CreateTaskRequest::new(profile_id, " buy MILK ").with_status("done"))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected a duplicate title error"))?;

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(context.state.tasks.list_tasks(profile_id, None).await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_optional_fields_can_be_cleared() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;
    let date = NaiveDate::from_ymd_opt(2026, 4, 2).ok_or_else(|| eyre::eyre!("invalid date"))?;
    let record = context
        .state
        .records
        .create_record(
            CreateRecordRequest::new(profile_id, "Chest X-ray", date)
                .with_description("Routine")
                .with_image("scans/chest.png"),
        )
        .await?;

    context
        .state
        .records
        .update_record(
            UpdateRecordRequest::new(profile_id, record.id())
                .with_image(None)
                .with_analysis_summary(Some("Clear".to_owned())),
        )
        .await?;
    let fetched = context
        .state
        .records
        .get_record(profile_id, record.id())
        .await?;

    assert_eq!(fetched.image(), None);
    assert_eq!(fetched.description(), "Routine");
    assert_eq!(fetched.date(), date);
    assert_eq!(fetched.analysis().summary.as_deref(), Some("Clear"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_profile_row_cascades_to_tasks() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;
    context
        .state
        .tasks
        .create_task(CreateTaskRequest::new(profile_id, "Orphan"))
        .await?;

    let profiles = PostgresProfileRepository::new(context.pool.clone());
    let tasks = PostgresTaskRepository::new(context.pool.clone());
    profiles.delete(profile_id).await?;

    assert!(tasks.list_by_profile(profile_id).await?.is_empty());
    assert!(!profiles.exists(profile_id).await?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn service_delete_removes_everything_the_profile_owns() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;
    let date = NaiveDate::from_ymd_opt(2026, 1, 9).ok_or_else(|| eyre::eyre!("invalid date"))?;
    context
        .state
        .tasks
        .create_task(CreateTaskRequest::new(profile_id, "Refill"))
        .await?;
    context
        .state
        .records
        .create_record(CreateRecordRequest::new(profile_id, "Panel", date))
        .await?;

    context.state.profiles.delete_profile(profile_id).await?;

    let err = context
        .state
        .profiles
        .get_profile(profile_id)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected the profile to be gone"))?;
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let tasks = PostgresTaskRepository::new(context.pool.clone());
    assert!(tasks.list_by_profile(profile_id).await?.is_empty());
    Ok(())
}
