//! Error handling for the API server
//!
//! All handlers return `Result<T, ApiError>`; the error converts itself into
//! the matching HTTP response. Only two kinds of failure surface to clients:
//! validation problems (400, with an itemized issue list) and everything
//! else (500, generic message, details logged server-side). "Not found" is
//! not an error; handlers map absent repository results to 404 explicitly.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use opsdesk_shared::repos::RepoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request (unparseable body, bad path parameter), 400
    BadRequest(String),

    /// Input failed validation, 400 with itemized issues
    Validation(Vec<ValidationIssue>),

    /// Resource does not exist, 404
    NotFound(String),

    /// Anything else, 500 with a generic body
    Internal(String),
}

/// One field-level validation problem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field that failed validation
    pub field: String,

    /// Human-readable message
    pub message: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,

    /// Field-level issues, present for validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<ValidationIssue>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Validation(issues) => {
                write!(f, "Validation failed: {} issues", issues.len())
            }
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message,
                    issues: None,
                },
            ),
            ApiError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: "Validation error".to_string(),
                    issues: Some(issues),
                },
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    message,
                    issues: None,
                },
            ),
            ApiError::Internal(message) => {
                // Log the detail, never expose it to clients
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: "Internal server error".to_string(),
                        issues: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Repository failures (unreachable store, database errors) are internal
impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Unparseable JSON bodies map to 400
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// `validator` failures map to the itemized 400 shape
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let issues = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationIssue {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();
        ApiError::Validation(issues)
    }
}
