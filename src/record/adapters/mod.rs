//! Adapter implementations for medical record ports.

pub mod memory;
pub mod postgres;
