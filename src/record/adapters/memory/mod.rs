//! In-memory medical record adapters.

mod record;

pub use record::InMemoryMedicalRecordRepository;
