//! Column rewrite tests for the `PostgreSQL` task adapter.

#![expect(
    clippy::panic_in_result_fn,
    reason = "Tests use assertions for verification while returning Result for error propagation"
)]

use crate::postgres::helpers::{PostgresContext, column, connect, ensure_contiguous, seed_profile};
use healthboard::error::ErrorKind;
use healthboard::profile::domain::ProfileId;
use healthboard::task::{
    domain::{Task, TaskStatus},
    services::{CreateTaskRequest, RawIndex, ReorderTaskRequest},
};
use rstest::rstest;

async fn seed(
    context: &PostgresContext,
    profile_id: ProfileId,
    status: TaskStatus,
    titles: &[&str],
) -> Result<Vec<Task>, eyre::Report> {
    let mut created = Vec::with_capacity(titles.len());
    for title in titles {
        let request = CreateTaskRequest::new(profile_id, *title).with_status(status.as_str());
        created.push(context.state.tasks.create_task(request).await?);
    }
    Ok(created)
}

fn pairs(expected: &[(&str, u32)]) -> Vec<(String, u32)> {
    expected
        .iter()
        .map(|(title, order)| ((*title).to_owned(), *order))
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_up_shifts_the_peers_between() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;
    let tasks = seed(&context, profile_id, TaskStatus::Todo, &["A", "B", "C"]).await?;
    let b = tasks.get(1).ok_or_else(|| eyre::eyre!("missing seeded task"))?;

    let moved = context
        .state
        .tasks
        .reorder_task(ReorderTaskRequest::new(profile_id, b.id(), "todo").with_index(0))
        .await?;

    assert_eq!(moved.order().value(), 0);
    assert_eq!(
        column(&context, profile_id, TaskStatus::Todo).await?,
        pairs(&[("B", 0), ("A", 1), ("C", 2)])
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cross_column_moves_close_and_open_gaps() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;
    let todo = seed(&context, profile_id, TaskStatus::Todo, &["A", "B"]).await?;
    seed(&context, profile_id, TaskStatus::Done, &["C"]).await?;
    let a = todo.first().ok_or_else(|| eyre::eyre!("missing seeded task"))?;

    context
        .state
        .tasks
        .reorder_task(
            ReorderTaskRequest::new(profile_id, a.id(), "done")
                .with_raw_index(RawIndex::Text("0".to_owned())),
        )
        .await?;

    assert_eq!(
        column(&context, profile_id, TaskStatus::Todo).await?,
        pairs(&[("B", 0)])
    );
    assert_eq!(
        column(&context, profile_id, TaskStatus::Done).await?,
        pairs(&[("A", 0), ("C", 1)])
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_moves_leave_rows_untouched() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;
    let tasks = seed(&context, profile_id, TaskStatus::Todo, &["A", "B"]).await?;
    let b = tasks.get(1).ok_or_else(|| eyre::eyre!("missing seeded task"))?;

    let err = context
        .state
        .tasks
        .reorder_task(ReorderTaskRequest::new(profile_id, b.id(), "done").with_index(-1))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected a negative index to be rejected"))?;

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(
        column(&context, profile_id, TaskStatus::Todo).await?,
        pairs(&[("A", 0), ("B", 1)])
    );
    assert!(column(&context, profile_id, TaskStatus::Done).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_closes_the_gap() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;
    let tasks = seed(&context, profile_id, TaskStatus::InProgress, &["A", "B", "C"]).await?;
    let b = tasks.get(1).ok_or_else(|| eyre::eyre!("missing seeded task"))?;

    context.state.tasks.delete_task(profile_id, b.id()).await?;

    assert_eq!(
        column(&context, profile_id, TaskStatus::InProgress).await?,
        pairs(&[("A", 0), ("C", 1)])
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_writers_serialize_on_the_profile() -> Result<(), eyre::Report> {
    let Some(context) = connect().await? else {
        return Ok(());
    };
    let profile_id = seed_profile(&context).await?;
    let titles: Vec<String> = (0..8).map(|n| format!("Task {n}")).collect();
    let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    let created = seed(&context, profile_id, TaskStatus::Todo, &title_refs).await?;

    let targets = TaskStatus::ALL.iter().copied().cycle();
    let mut handles = Vec::with_capacity(created.len() * 2);
    for (task, target) in created.iter().zip(targets) {
        let tasks = context.state.tasks.clone();
        let task_id = task.id();
        handles.push(tokio::spawn(async move {
            tasks
                .reorder_task(ReorderTaskRequest::new(profile_id, task_id, target.as_str()))
                .await
                .map(|_| ())
        }));
    }
    for n in 0..4 {
        let tasks = context.state.tasks.clone();
        handles.push(tokio::spawn(async move {
            tasks
                .create_task(CreateTaskRequest::new(profile_id, format!("Late {n}")))
                .await
                .map(|_| ())
        }));
    }
    for handle in handles {
        handle.await??;
    }

    ensure_contiguous(&context, profile_id).await?;
    let total = context.state.tasks.list_tasks(profile_id, None).await?.len();
    assert_eq!(total, created.len() + 4);
    Ok(())
}
