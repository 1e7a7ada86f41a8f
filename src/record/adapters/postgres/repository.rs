//! `PostgreSQL` repository implementation for medical records.

use super::{models::MedicalRecordRow, schema::medical_records};
use crate::db::PgPool;
use crate::profile::domain::ProfileId;
use crate::record::{
    domain::{MedicalRecord, MedicalRecordId, PersistedRecordData, RecordAnalysis, RecordTitle},
    ports::{
        MedicalRecordRepository, MedicalRecordRepositoryError, MedicalRecordRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed medical record repository.
#[derive(Debug, Clone)]
pub struct PostgresMedicalRecordRepository {
    pool: PgPool,
}

impl PostgresMedicalRecordRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MedicalRecordRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MedicalRecordRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(MedicalRecordRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MedicalRecordRepositoryError::persistence)?
    }
}

#[async_trait]
impl MedicalRecordRepository for PostgresMedicalRecordRepository {
    async fn store(&self, record: &MedicalRecord) -> MedicalRecordRepositoryResult<()> {
        let record_id = record.id();
        let profile_id = record.profile_id();
        let row = to_row(record);
        self.run_blocking(move |connection| {
            diesel::insert_into(medical_records::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MedicalRecordRepositoryError::DuplicateRecord(record_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        MedicalRecordRepositoryError::ProfileNotFound(profile_id)
                    }
                    _ => MedicalRecordRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, record: &MedicalRecord) -> MedicalRecordRepositoryResult<()> {
        let record_id = record.id();
        let row = to_row(record);
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                medical_records::table
                    .filter(medical_records::id.eq(row.id))
                    .filter(medical_records::profile_id.eq(row.profile_id)),
            )
            .set(&row)
            .execute(connection)
            .map_err(MedicalRecordRepositoryError::persistence)?;
            if updated == 0 {
                return Err(MedicalRecordRepositoryError::NotFound(record_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        profile_id: ProfileId,
        id: MedicalRecordId,
    ) -> MedicalRecordRepositoryResult<Option<MedicalRecord>> {
        self.run_blocking(move |connection| {
            medical_records::table
                .filter(medical_records::id.eq(id.into_inner()))
                .filter(medical_records::profile_id.eq(profile_id.into_inner()))
                .select(MedicalRecordRow::as_select())
                .first::<MedicalRecordRow>(connection)
                .optional()
                .map_err(MedicalRecordRepositoryError::persistence)?
                .map(row_to_record)
                .transpose()
        })
        .await
    }

    async fn list_by_profile(
        &self,
        profile_id: ProfileId,
    ) -> MedicalRecordRepositoryResult<Vec<MedicalRecord>> {
        self.run_blocking(move |connection| {
            let rows = medical_records::table
                .filter(medical_records::profile_id.eq(profile_id.into_inner()))
                .order((
                    medical_records::record_date.desc(),
                    medical_records::created_at.desc(),
                ))
                .select(MedicalRecordRow::as_select())
                .load::<MedicalRecordRow>(connection)
                .map_err(MedicalRecordRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn delete(
        &self,
        profile_id: ProfileId,
        id: MedicalRecordId,
    ) -> MedicalRecordRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                medical_records::table
                    .filter(medical_records::id.eq(id.into_inner()))
                    .filter(medical_records::profile_id.eq(profile_id.into_inner())),
            )
            .execute(connection)
            .map_err(MedicalRecordRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(MedicalRecordRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(record: &MedicalRecord) -> MedicalRecordRow {
    let analysis = record.analysis();
    MedicalRecordRow {
        id: record.id().into_inner(),
        profile_id: record.profile_id().into_inner(),
        title: record.title().as_str().to_owned(),
        record_date: record.date(),
        description: record.description().to_owned(),
        image: record.image().map(str::to_owned),
        image_data: record.image_data().map(str::to_owned),
        analysis_summary: analysis.summary.clone(),
        analysis_actions: analysis.actions.clone(),
        analysis_recommendations: analysis.recommendations.clone(),
        created_at: record.created_at(),
        updated_at: record.updated_at(),
    }
}

fn row_to_record(row: MedicalRecordRow) -> MedicalRecordRepositoryResult<MedicalRecord> {
    let title = RecordTitle::new(row.title).map_err(MedicalRecordRepositoryError::persistence)?;
    Ok(MedicalRecord::from_persisted(PersistedRecordData {
        id: MedicalRecordId::from_uuid(row.id),
        profile_id: ProfileId::from_uuid(row.profile_id),
        title,
        date: row.record_date,
        description: row.description,
        image: row.image,
        image_data: row.image_data,
        analysis: RecordAnalysis {
            summary: row.analysis_summary,
            actions: row.analysis_actions,
            recommendations: row.analysis_recommendations,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
