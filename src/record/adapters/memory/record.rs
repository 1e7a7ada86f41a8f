//! In-memory repository for medical records.
//!
//! A store built with [`InMemoryMedicalRecordRepository::owned_by`] stores
//! records only while the owning profile is present in the shared table.
//! Otherwise owning-profile existence is checked by the service layer.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::profile::{
    adapters::memory::{ProfileOwnedRows, ProfileTable, PurgeRows},
    domain::ProfileId,
    ports::{ProfileRepositoryError, ProfileRepositoryResult},
};
use crate::record::{
    domain::{MedicalRecord, MedicalRecordId},
    ports::{
        MedicalRecordRepository, MedicalRecordRepositoryError, MedicalRecordRepositoryResult,
    },
};

/// Thread-safe in-memory medical record repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMedicalRecordRepository {
    state: Arc<RwLock<HashMap<MedicalRecordId, MedicalRecord>>>,
    owners: Option<ProfileTable>,
}

impl InMemoryMedicalRecordRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository whose records belong to profiles in
    /// `owners`.
    #[must_use]
    pub fn owned_by(owners: ProfileTable) -> Self {
        Self {
            state: Arc::default(),
            owners: Some(owners),
        }
    }

    fn insert(&self, record: &MedicalRecord) -> MedicalRecordRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&record.id()) {
            return Err(MedicalRecordRepositoryError::DuplicateRecord(record.id()));
        }
        state.insert(record.id(), record.clone());
        Ok(())
    }
}

struct LockedRecords<'a>(RwLockWriteGuard<'a, HashMap<MedicalRecordId, MedicalRecord>>);

impl PurgeRows for LockedRecords<'_> {
    fn purge(&mut self, profile_id: ProfileId) -> u64 {
        let before = self.0.len();
        self.0.retain(|_, record| record.profile_id() != profile_id);
        u64::try_from(before.saturating_sub(self.0.len())).unwrap_or(u64::MAX)
    }
}

impl ProfileOwnedRows for InMemoryMedicalRecordRepository {
    fn lock_rows(&self) -> ProfileRepositoryResult<Box<dyn PurgeRows + '_>> {
        let state = self.state.write().map_err(|err| {
            ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Box::new(LockedRecords(state)))
    }
}

fn lock_error(err: impl ToString) -> MedicalRecordRepositoryError {
    MedicalRecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MedicalRecordRepository for InMemoryMedicalRecordRepository {
    async fn store(&self, record: &MedicalRecord) -> MedicalRecordRepositoryResult<()> {
        let Some(owners) = &self.owners else {
            return self.insert(record);
        };
        owners
            .while_present(record.profile_id(), || self.insert(record))
            .map_err(MedicalRecordRepositoryError::persistence)?
            .unwrap_or_else(|| {
                Err(MedicalRecordRepositoryError::ProfileNotFound(
                    record.profile_id(),
                ))
            })
    }

    async fn update(&self, record: &MedicalRecord) -> MedicalRecordRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .get_mut(&record.id())
            .filter(|existing| existing.profile_id() == record.profile_id())
            .ok_or(MedicalRecordRepositoryError::NotFound(record.id()))?;
        *slot = record.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        profile_id: ProfileId,
        id: MedicalRecordId,
    ) -> MedicalRecordRepositoryResult<Option<MedicalRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .get(&id)
            .filter(|record| record.profile_id() == profile_id)
            .cloned())
    }

    async fn list_by_profile(
        &self,
        profile_id: ProfileId,
    ) -> MedicalRecordRepositoryResult<Vec<MedicalRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut records: Vec<MedicalRecord> = state
            .values()
            .filter(|record| record.profile_id() == profile_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| (Reverse(record.date()), Reverse(record.created_at())));
        Ok(records)
    }

    async fn delete(
        &self,
        profile_id: ProfileId,
        id: MedicalRecordId,
    ) -> MedicalRecordRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let owned = state
            .get(&id)
            .is_some_and(|record| record.profile_id() == profile_id);
        if !owned {
            return Err(MedicalRecordRepositoryError::NotFound(id));
        }
        state.remove(&id);
        Ok(())
    }
}
