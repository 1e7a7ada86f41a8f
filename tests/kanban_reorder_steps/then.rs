//! Then steps for Kanban reordering BDD scenarios.

use super::world::{KanbanWorld, status, titles};
use healthboard::error::ErrorKind;
use rstest_bdd_macros::then;

#[then(r#"column "{column}" reads "{list}""#)]
fn column_reads(world: &KanbanWorld, column: String, list: String) -> Result<(), eyre::Report> {
    let found = world.column_titles(status(&column)?)?;
    let expected = titles(&list);
    if found != expected {
        return Err(eyre::eyre!(
            "column {column}: expected {expected:?}, found {found:?}"
        ));
    }
    Ok(())
}

#[then(r#"column "{column}" is empty"#)]
fn column_is_empty(world: &KanbanWorld, column: String) -> Result<(), eyre::Report> {
    let found = world.column_titles(status(&column)?)?;
    if !found.is_empty() {
        return Err(eyre::eyre!("column {column}: expected empty, found {found:?}"));
    }
    Ok(())
}

#[then("the request fails with a conflict")]
fn fails_with_conflict(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the request to fail"))?;
    if err.kind() != ErrorKind::Conflict {
        return Err(eyre::eyre!("expected a conflict, got {err:?}"));
    }
    Ok(())
}

#[then(r#"the request fails with an invalid "{field}""#)]
fn fails_with_invalid_field(world: &KanbanWorld, field: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the request to fail"))?;
    if err.kind() != ErrorKind::InvalidArgument || err.field() != Some(field.as_str()) {
        return Err(eyre::eyre!("expected invalid {field}, got {err:?}"));
    }
    Ok(())
}
