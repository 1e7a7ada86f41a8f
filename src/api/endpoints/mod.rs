//! Route handlers, one module per resource.

pub mod health;
pub mod profiles;
pub mod records;
pub mod tasks;

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::api::error::ApiError;

/// Parses a path segment as a UUID, naming the segment on failure.
pub(crate) fn parse_uuid(raw: &str, field: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::invalid_field(field, format!("'{raw}' is not a valid identifier")))
}

/// Distinguishes an absent field from an explicit `null`: absent stays
/// `None` through `#[serde(default)]`, `null` becomes `Some(None)`.
pub(crate) fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
