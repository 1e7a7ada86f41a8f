//! Domain model for medical records.

mod error;
mod ids;
mod record;

pub use error::RecordDomainError;
pub use ids::{MedicalRecordId, RecordTitle};
pub use record::{MedicalRecord, NewMedicalRecord, PersistedRecordData, RecordAnalysis};
