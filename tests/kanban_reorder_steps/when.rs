//! When steps for Kanban reordering BDD scenarios.

use super::world::{KanbanWorld, run_async};
use healthboard::task::services::{CreateTaskRequest, RawIndex, ReorderTaskRequest};
use rstest_bdd_macros::when;

#[when(r#"task "{title}" is moved to "{status}" at index "{index}""#)]
fn move_task(
    world: &mut KanbanWorld,
    title: String,
    status: String,
    index: String,
) -> Result<(), eyre::Report> {
    let request = ReorderTaskRequest::new(world.profile_id()?, world.task_id(&title)?, status)
        .with_raw_index(RawIndex::Text(index));
    world.last_error = run_async(world.service.reorder_task(request)).err();
    Ok(())
}

#[when(r#"a task titled "{title}" is created in "{status}""#)]
fn create_task(world: &mut KanbanWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(world.profile_id()?, title).with_status(status);
    world.last_error = run_async(world.service.create_task(request)).err();
    Ok(())
}

#[when(r#"task "{title}" is deleted"#)]
fn delete_task(world: &mut KanbanWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    world.last_error = run_async(world.service.delete_task(world.profile_id()?, task_id)).err();
    Ok(())
}
