//! Application services for medical records.

mod records;

pub use records::{
    CreateRecordRequest, MedicalRecordService, RecordServiceError, RecordServiceResult,
    UpdateRecordRequest,
};
