//! Unit tests for the medical record module.

mod service_tests;
