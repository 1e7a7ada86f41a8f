//! API error type with structured JSON responses.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::profile::services::ProfileServiceError;
use crate::record::services::RecordServiceError;
use crate::task::services::TaskServiceError;

const INTERNAL_MESSAGE: &str = "an internal error occurred";

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// The error.
    pub error: ErrorDetail,
}

/// Machine-readable error description.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Stable error code such as `NOT_FOUND`.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Per-field reasons for validation failures.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<&'static str, String>,
}

/// An error returned from a handler.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    fields: BTreeMap<&'static str, String>,
}

impl ApiError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Creates a validation error attributed to one request field.
    #[must_use]
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        let text = message.into();
        Self::new(ErrorKind::InvalidArgument, text.clone()).with_field(field, text)
    }

    /// Attaches a field reason.
    #[must_use]
    pub fn with_field(mut self, field: &'static str, reason: impl Into<String>) -> Self {
        self.fields.insert(field, reason.into());
        self
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status the error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidArgument | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn classified(kind: ErrorKind, message: String, field: Option<&'static str>) -> Self {
        let error = Self::new(kind, message);
        match field {
            Some(name) => {
                let reason = error.message.clone();
                error.with_field(name, reason)
            }
            None => error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.kind == ErrorKind::Internal {
            tracing::error!(detail = %self.message, "request failed with internal error");
            INTERNAL_MESSAGE.to_owned()
        } else {
            tracing::debug!(code = self.kind.code(), message = %self.message, "request rejected");
            self.message
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.kind.code(),
                message,
                fields: self.fields,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        Self::classified(err.kind(), err.to_string(), err.field())
    }
}

impl From<ProfileServiceError> for ApiError {
    fn from(err: ProfileServiceError) -> Self {
        let field = match &err {
            ProfileServiceError::Domain(domain) => Some(domain.field()),
            _ => None,
        };
        Self::classified(err.kind(), err.to_string(), field)
    }
}

impl From<RecordServiceError> for ApiError {
    fn from(err: RecordServiceError) -> Self {
        let field = match &err {
            RecordServiceError::Domain(domain) => Some(domain.field()),
            _ => None,
        };
        Self::classified(err.kind(), err.to_string(), field)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ErrorKind::InvalidArgument, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(ErrorKind::InvalidArgument, rejection.body_text())
    }
}
