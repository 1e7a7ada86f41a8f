//! Port contracts for medical record persistence.

pub mod repository;

pub use repository::{
    MedicalRecordRepository, MedicalRecordRepositoryError, MedicalRecordRepositoryResult,
};
