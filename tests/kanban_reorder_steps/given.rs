//! Given steps for Kanban reordering BDD scenarios.

use super::world::{KanbanWorld, run_async, titles};
use eyre::WrapErr;
use healthboard::task::services::CreateTaskRequest;
use rstest_bdd_macros::given;

fn seed_column(world: &mut KanbanWorld, list: &str, status: &str) -> Result<(), eyre::Report> {
    let profile_id = world.ensure_profile()?;
    for title in titles(list) {
        let request = CreateTaskRequest::new(profile_id, title.clone()).with_status(status);
        let task = run_async(world.service.create_task(request))
            .wrap_err_with(|| format!("seed task '{title}'"))?;
        world.task_ids.insert(title, task.id());
    }
    Ok(())
}

#[given(r#"a profile with tasks "{list}" in "{status}""#)]
fn profile_with_tasks(
    world: &mut KanbanWorld,
    list: String,
    status: String,
) -> Result<(), eyre::Report> {
    seed_column(world, &list, &status)
}

#[given(r#"tasks "{list}" in "{status}""#)]
fn more_tasks(world: &mut KanbanWorld, list: String, status: String) -> Result<(), eyre::Report> {
    seed_column(world, &list, &status)
}
