//! `PostgreSQL` adapters for medical record persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresMedicalRecordRepository;
