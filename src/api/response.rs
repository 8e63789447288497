//! Response types for the roster API.
//!
//! This module defines the error response structures, the mapping from
//! engine errors to HTTP statuses, and the response bodies that wrap
//! engine results.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Employee, EmployeeCostLine};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidTime { value, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_TIME",
                    message,
                    format!("'{}' is not a valid HH:MM time", value),
                ),
            ),
            EngineError::Validation { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details("VALIDATION_ERROR", message, field),
            ),
            EngineError::DocumentNotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
            }
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::VocabularyInUse { references, .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "VOCABULARY_IN_USE",
                    message,
                    format!("Reassign the {} referencing record(s) first", references),
                ),
            ),
            EngineError::DuplicateName { .. } => {
                (StatusCode::CONFLICT, ApiError::new("DUPLICATE_NAME", message))
            }
            EngineError::EmailInUse { .. } => {
                (StatusCode::CONFLICT, ApiError::new("EMAIL_IN_USE", message))
            }
            EngineError::Store { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Document store failure", message),
            ),
            EngineError::Serialization { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("SERIALIZATION_ERROR", "Stored document is invalid", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// An employee together with their weekly schedule summary.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDetail {
    /// The employee record.
    #[serde(flatten)]
    pub employee: Employee,
    /// Weekly hours and cost, absent when the employee has no shifts.
    pub weekly: Option<EmployeeCostLine>,
}

/// Result of a bulk delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    /// How many shifts were removed.
    pub removed: usize,
}
