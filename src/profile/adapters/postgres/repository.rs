//! `PostgreSQL` repository implementation for profiles.

use super::{
    models::{ProfileRecordRow, ProfileRow},
    schema::profiles,
};
use crate::db::PgPool;
use crate::profile::{
    domain::{PersistedProfileData, Profile, ProfileId, ProfileName, Relationship},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed profile repository.
///
/// Deleting a profile relies on the `ON DELETE CASCADE` foreign keys of
/// `medical_records` and `tasks`.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProfileRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProfileRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn store(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let profile_id = profile.id();
        let row = to_row(profile);
        self.run_blocking(move |connection| {
            diesel::insert_into(profiles::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProfileRepositoryError::DuplicateProfile(profile_id)
                    }
                    _ => ProfileRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, profile: &Profile) -> ProfileRepositoryResult<()> {
        let profile_id = profile.id();
        let row = to_row(profile);
        self.run_blocking(move |connection| {
            let updated = diesel::update(profiles::table.find(profile_id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProfileRepositoryError::NotFound(profile_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProfileId) -> ProfileRepositoryResult<Option<Profile>> {
        self.run_blocking(move |connection| {
            profiles::table
                .find(id.into_inner())
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?
                .map(row_to_profile)
                .transpose()
        })
        .await
    }

    async fn list(&self) -> ProfileRepositoryResult<Vec<Profile>> {
        self.run_blocking(move |connection| {
            let rows = profiles::table
                .order((profiles::created_at.asc(), profiles::id.asc()))
                .select(ProfileRow::as_select())
                .load::<ProfileRow>(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            rows.into_iter().map(row_to_profile).collect()
        })
        .await
    }

    async fn exists(&self, id: ProfileId) -> ProfileRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let count: i64 = profiles::table
                .filter(profiles::id.eq(id.into_inner()))
                .count()
                .get_result(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            Ok(count > 0)
        })
        .await
    }

    async fn delete(&self, id: ProfileId) -> ProfileRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(profiles::table.find(id.into_inner()))
                .execute(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ProfileRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(profile: &Profile) -> ProfileRecordRow {
    ProfileRecordRow {
        id: profile.id().into_inner(),
        name: profile.name().as_str().to_owned(),
        relationship: profile.relationship().as_str().to_owned(),
        created_at: profile.created_at(),
        updated_at: profile.updated_at(),
    }
}

fn row_to_profile(row: ProfileRow) -> ProfileRepositoryResult<Profile> {
    let name = ProfileName::new(row.name).map_err(ProfileRepositoryError::persistence)?;
    let relationship =
        Relationship::new(row.relationship).map_err(ProfileRepositoryError::persistence)?;
    Ok(Profile::from_persisted(PersistedProfileData {
        id: ProfileId::from_uuid(row.id),
        name,
        relationship,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
