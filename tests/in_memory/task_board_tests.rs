//! In-memory integration tests for Kanban column ordering.

#![expect(
    clippy::panic_in_result_fn,
    reason = "Tests use assertions for verification while returning Result for error propagation"
)]

use std::collections::HashSet;

use crate::in_memory::helpers::{
    MemoryState, column_titles, ensure_contiguous, seed_profile, seed_tasks, state,
};
use healthboard::task::{
    domain::TaskStatus,
    services::{CreateTaskRequest, ReorderTaskRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_fill_the_column_without_gaps(
    state: MemoryState,
) -> Result<(), eyre::Report> {
    let profile_id = seed_profile(&state, "Ada").await?;

    let handles: Vec<_> = (0..24)
        .map(|n| {
            let tasks = state.tasks.clone();
            tokio::spawn(async move {
                tasks
                    .create_task(CreateTaskRequest::new(profile_id, format!("Task {n}")))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let todo = state.tasks.list_tasks(profile_id, Some(TaskStatus::Todo)).await?;
    assert_eq!(todo.len(), 24);
    ensure_contiguous(&state, profile_id).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_moves_keep_every_column_contiguous(
    state: MemoryState,
) -> Result<(), eyre::Report> {
    let profile_id = seed_profile(&state, "Ada").await?;
    let titles: Vec<String> = (0..12).map(|n| format!("Task {n}")).collect();
    let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    let created = seed_tasks(&state, profile_id, TaskStatus::Todo, &title_refs).await?;

    let targets = TaskStatus::ALL.iter().copied().cycle();
    let indices = [0_i64, 1, 2, 3].into_iter().cycle();
    let handles: Vec<_> = created
        .iter()
        .zip(targets.zip(indices))
        .map(|(task, (target, index))| {
            let tasks = state.tasks.clone();
            let task_id = task.id();
            tokio::spawn(async move {
                tasks
                    .reorder_task(
                        ReorderTaskRequest::new(profile_id, task_id, target.as_str())
                            .with_index(index),
                    )
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    ensure_contiguous(&state, profile_id).await?;
    let board = state.tasks.board(profile_id).await?;
    let seen: HashSet<_> = board
        .columns
        .iter()
        .flat_map(|column| column.tasks.iter().map(|task| task.id()))
        .collect();
    assert_eq!(seen.len(), created.len());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moves_and_deletes_compose(state: MemoryState) -> Result<(), eyre::Report> {
    let profile_id = seed_profile(&state, "Ada").await?;
    let todo = seed_tasks(&state, profile_id, TaskStatus::Todo, &["A", "B", "C", "D"]).await?;
    seed_tasks(&state, profile_id, TaskStatus::InProgress, &["E"]).await?;
    let [a, b, c, d] = todo.as_slice() else {
        return Err(eyre::eyre!("expected four seeded tasks"));
    };

    state
        .tasks
        .reorder_task(ReorderTaskRequest::new(profile_id, d.id(), "todo").with_index(0))
        .await?;
    state
        .tasks
        .reorder_task(ReorderTaskRequest::new(profile_id, b.id(), "inprogress").with_index(1))
        .await?;
    state.tasks.delete_task(profile_id, a.id()).await?;
    state
        .tasks
        .reorder_task(ReorderTaskRequest::new(profile_id, c.id(), "done"))
        .await?;

    assert_eq!(column_titles(&state, profile_id, TaskStatus::Todo).await?, ["D"]);
    assert_eq!(
        column_titles(&state, profile_id, TaskStatus::InProgress).await?,
        ["E", "B"]
    );
    assert_eq!(column_titles(&state, profile_id, TaskStatus::Done).await?, ["C"]);
    ensure_contiguous(&state, profile_id).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn profiles_have_independent_columns(state: MemoryState) -> Result<(), eyre::Report> {
    let ada = seed_profile(&state, "Ada").await?;
    let grace = seed_profile(&state, "Grace").await?;
    let ada_tasks = seed_tasks(&state, ada, TaskStatus::Todo, &["Refill", "Scan"]).await?;
    seed_tasks(&state, grace, TaskStatus::Todo, &["Refill", "Scan"]).await?;
    let scan = ada_tasks
        .last()
        .ok_or_else(|| eyre::eyre!("expected seeded tasks"))?;

    state
        .tasks
        .reorder_task(ReorderTaskRequest::new(ada, scan.id(), "todo").with_index(0))
        .await?;

    assert_eq!(
        column_titles(&state, ada, TaskStatus::Todo).await?,
        ["Scan", "Refill"]
    );
    assert_eq!(
        column_titles(&state, grace, TaskStatus::Todo).await?,
        ["Refill", "Scan"]
    );
    Ok(())
}
