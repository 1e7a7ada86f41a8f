//! Shared handler state.

use std::marker::PhantomData;
use std::sync::Arc;

use mockable::DefaultClock;

use crate::db::PgPool;
use crate::profile::{
    adapters::{
        memory::{InMemoryProfileRepository, ProfileOwnedRows, ProfileTable},
        postgres::PostgresProfileRepository,
    },
    ports::ProfileRepository,
    services::ProfileService,
};
use crate::record::{
    adapters::{memory::InMemoryMedicalRecordRepository, postgres::PostgresMedicalRecordRepository},
    ports::MedicalRecordRepository,
    services::MedicalRecordService,
};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskBoardService,
};

/// A set of repository implementations the API can be served from.
pub trait Stores: Send + Sync + 'static {
    /// Profile storage.
    type Profiles: ProfileRepository + 'static;
    /// Medical record storage.
    type Records: MedicalRecordRepository + 'static;
    /// Task storage.
    type Tasks: TaskRepository + 'static;
}

/// Process-local storage, used by tests and demos.
#[derive(Debug)]
pub struct InMemoryStores;

impl Stores for InMemoryStores {
    type Profiles = InMemoryProfileRepository;
    type Records = InMemoryMedicalRecordRepository;
    type Tasks = InMemoryTaskRepository;
}

/// Empty in-memory repositories sharing one profile table, so that inserts
/// require the owning profile and profile deletes cascade.
#[derive(Debug, Clone)]
pub struct InMemoryRepositories {
    /// Profile storage.
    pub profiles: Arc<InMemoryProfileRepository>,
    /// Medical record storage.
    pub records: Arc<InMemoryMedicalRecordRepository>,
    /// Task storage.
    pub tasks: Arc<InMemoryTaskRepository>,
}

impl InMemoryRepositories {
    /// Creates the linked repositories.
    #[must_use]
    pub fn new() -> Self {
        let table = ProfileTable::default();
        let records = Arc::new(InMemoryMedicalRecordRepository::owned_by(table.clone()));
        let tasks = Arc::new(InMemoryTaskRepository::owned_by(table.clone()));
        let owned = vec![
            Arc::clone(&records) as Arc<dyn ProfileOwnedRows>,
            Arc::clone(&tasks) as Arc<dyn ProfileOwnedRows>,
        ];
        Self {
            profiles: Arc::new(InMemoryProfileRepository::cascading_to(table, owned)),
            records,
            tasks,
        }
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

/// `PostgreSQL` storage through Diesel.
#[derive(Debug)]
pub struct PostgresStores;

impl Stores for PostgresStores {
    type Profiles = PostgresProfileRepository;
    type Records = PostgresMedicalRecordRepository;
    type Tasks = PostgresTaskRepository;
}

/// Profile service over a store set.
pub type ProfileServiceFor<S> =
    ProfileService<<S as Stores>::Profiles, <S as Stores>::Records, DefaultClock>;
/// Medical record service over a store set.
pub type RecordServiceFor<S> =
    MedicalRecordService<<S as Stores>::Profiles, <S as Stores>::Records, DefaultClock>;
/// Task board service over a store set.
pub type TaskServiceFor<S> =
    TaskBoardService<<S as Stores>::Profiles, <S as Stores>::Tasks, DefaultClock>;

/// Services shared by every handler.
pub struct AppState<S: Stores> {
    /// Profile CRUD and cascading deletion.
    pub profiles: Arc<ProfileServiceFor<S>>,
    /// Medical record CRUD.
    pub records: Arc<RecordServiceFor<S>>,
    /// Task CRUD and reordering.
    pub tasks: Arc<TaskServiceFor<S>>,
    stores: PhantomData<fn() -> S>,
}

impl<S: Stores> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
            records: Arc::clone(&self.records),
            tasks: Arc::clone(&self.tasks),
            stores: PhantomData,
        }
    }
}

impl<S: Stores> AppState<S> {
    /// Wires the three services over shared repositories.
    #[must_use]
    pub fn from_repositories(
        profiles: Arc<S::Profiles>,
        records: Arc<S::Records>,
        tasks: Arc<S::Tasks>,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            profiles: Arc::new(ProfileService::new(
                Arc::clone(&profiles),
                Arc::clone(&records),
                Arc::clone(&clock),
            )),
            records: Arc::new(MedicalRecordService::new(
                Arc::clone(&profiles),
                records,
                Arc::clone(&clock),
            )),
            tasks: Arc::new(TaskBoardService::new(profiles, tasks, clock)),
            stores: PhantomData,
        }
    }
}

impl AppState<InMemoryStores> {
    /// Creates state backed by empty, linked in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        let InMemoryRepositories {
            profiles,
            records,
            tasks,
        } = InMemoryRepositories::new();
        Self::from_repositories(profiles, records, tasks)
    }
}

impl AppState<PostgresStores> {
    /// Creates state backed by `PostgreSQL` repositories sharing one pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self::from_repositories(
            Arc::new(PostgresProfileRepository::new(pool.clone())),
            Arc::new(PostgresMedicalRecordRepository::new(pool.clone())),
            Arc::new(PostgresTaskRepository::new(pool.clone())),
        )
    }
}
