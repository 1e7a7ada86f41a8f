//! In-memory repository for profiles.
//!
//! Stores holding rows that belong to a profile share the [`ProfileTable`].
//! Inserts read-lock it to check the owner, and a delete write-locks it
//! before locking every owned-row store, so the cascade runs as one critical
//! section. Locks are always taken profile table first.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::profile::{
    domain::{Profile, ProfileId},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};

/// Profile rows shared between the profile repository and the stores of
/// rows that profiles own.
#[derive(Debug, Clone, Default)]
pub struct ProfileTable(Arc<RwLock<HashMap<ProfileId, Profile>>>);

impl ProfileTable {
    /// Runs `insert` while the table is read-locked, provided the profile
    /// exists. Returns `None` without calling `insert` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn while_present<T>(
        &self,
        profile_id: ProfileId,
        insert: impl FnOnce() -> T,
    ) -> ProfileRepositoryResult<Option<T>> {
        let profiles = self.0.read().map_err(lock_error)?;
        Ok(profiles.contains_key(&profile_id).then(insert))
    }
}

/// An in-memory store of rows owned by profiles.
pub trait ProfileOwnedRows: fmt::Debug + Send + Sync {
    /// Write-locks the store for a cascade. Nothing is removed until the
    /// returned guard purges.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::Persistence`] when the lock is
    /// poisoned.
    fn lock_rows(&self) -> ProfileRepositoryResult<Box<dyn PurgeRows + '_>>;
}

/// A write-locked store of profile-owned rows.
pub trait PurgeRows {
    /// Removes every row owned by the profile, returning how many went.
    fn purge(&mut self, profile_id: ProfileId) -> u64;
}

/// Thread-safe in-memory profile repository.
///
/// Built with [`InMemoryProfileRepository::new`] it owns nothing, and a
/// delete removes only the profile.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    table: ProfileTable,
    owned: Vec<Arc<dyn ProfileOwnedRows>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository over `table` whose deletes also purge `owned`.
    #[must_use]
    pub fn cascading_to(table: ProfileTable, owned: Vec<Arc<dyn ProfileOwnedRows>>) -> Self {
        Self { table, owned }
    }

    /// Returns a handle to the shared profile table.
    #[must_use]
    pub fn table(&self) -> ProfileTable {
        self.table.clone()
    }
}

fn lock_error(err: impl ToString) -> ProfileRepositoryError {
    ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut state = self.table.0.write().map_err(lock_error)?;
        if state.contains_key(&profile.id()) {
            return Err(ProfileRepositoryError::DuplicateProfile(profile.id()));
        }
        state.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let mut state = self.table.0.write().map_err(lock_error)?;
        let slot = state
            .get_mut(&profile.id())
            .ok_or(ProfileRepositoryError::NotFound(profile.id()))?;
        *slot = profile.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>> {
        let state = self.table.0.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn list(&self) -> ProfileRepositoryResult<Vec<Profile>> {
        let state = self.table.0.read().map_err(lock_error)?;
        let mut profiles: Vec<Profile> = state.values().cloned().collect();
        profiles.sort_by_key(|profile| (profile.created_at(), profile.id()));
        Ok(profiles)
    }

    async fn exists(&self, id: ProfileId) -> ProfileRepositoryResult<bool> {
        let state = self.table.0.read().map_err(lock_error)?;
        Ok(state.contains_key(&id))
    }

    async fn delete(&self, id: ProfileId) -> ProfileRepositoryResult<()> {
        let mut state = self.table.0.write().map_err(lock_error)?;
        if !state.contains_key(&id) {
            return Err(ProfileRepositoryError::NotFound(id));
        }
        let mut locked = self
            .owned
            .iter()
            .map(|rows| rows.lock_rows())
            .collect::<ProfileRepositoryResult<Vec<_>>>()?;
        let removed: u64 = locked.iter_mut().map(|rows| rows.purge(id)).sum();
        state.remove(&id);
        tracing::debug!(profile_id = %id, removed, "owned rows purged with profile");
        Ok(())
    }
}
