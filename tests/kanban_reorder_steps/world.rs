//! Shared world state for Kanban reordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use healthboard::profile::{
    adapters::memory::InMemoryProfileRepository,
    domain::{Profile, ProfileId, ProfileName, Relationship},
    ports::ProfileRepository,
};
use healthboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskId, TaskStatus},
    ports::TaskRepository,
    services::{TaskBoardService, TaskServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskBoardService<InMemoryProfileRepository, InMemoryTaskRepository, DefaultClock>;

/// Scenario world for Kanban reordering behaviour tests.
pub struct KanbanWorld {
    pub profiles: Arc<InMemoryProfileRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub service: TestTaskService,
    pub profile_id: Option<ProfileId>,
    pub task_ids: HashMap<String, TaskId>,
    pub last_error: Option<TaskServiceError>,
}

impl KanbanWorld {
    /// Creates a world with empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let service = TaskBoardService::new(
            Arc::clone(&profiles),
            Arc::clone(&tasks),
            Arc::new(DefaultClock),
        );
        Self {
            profiles,
            tasks,
            service,
            profile_id: None,
            task_ids: HashMap::new(),
            last_error: None,
        }
    }

    /// Returns the scenario profile, creating it on first use.
    pub fn ensure_profile(&mut self) -> Result<ProfileId, eyre::Report> {
        if let Some(id) = self.profile_id {
            return Ok(id);
        }
        let profile = Profile::new(
            ProfileName::new("Scenario profile")?,
            Relationship::default(),
            &DefaultClock,
        );
        run_async(self.profiles.store(&profile))?;
        self.profile_id = Some(profile.id());
        Ok(profile.id())
    }

    /// Returns the scenario profile.
    pub fn profile_id(&self) -> Result<ProfileId, eyre::Report> {
        self.profile_id
            .ok_or_else(|| eyre::eyre!("missing profile in scenario world"))
    }

    /// Looks up a task created earlier in the scenario by title.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled '{title}' in scenario world"))
    }

    /// Returns the titles of a column in order.
    pub fn column_titles(&self, status: TaskStatus) -> Result<Vec<String>, eyre::Report> {
        let profile_id = self.profile_id()?;
        let column = run_async(self.tasks.list_by_profile_status(profile_id, status))?;
        Ok(column
            .iter()
            .map(|task| task.title().as_str().to_owned())
            .collect())
    }
}

impl Default for KanbanWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> KanbanWorld {
    KanbanWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated title list from a step.
pub fn titles(list: &str) -> Vec<String> {
    list.split(',')
        .map(|title| title.trim().to_owned())
        .filter(|title| !title.is_empty())
        .collect()
}

/// Parses a status placeholder.
pub fn status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}
