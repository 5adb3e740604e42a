//! HTTP error responses.

use crate::utils::error::{ErrorCategory, TerminError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Stable code for programmatic handling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    /// Request is missing something or could not be parsed
    BadRequest(String),
    /// Nothing to return for this query
    NotFound(String),
    /// Engine error mapped to an explicit status
    Engine(StatusCode, TerminError),
}

impl AppError {
    /// Slot queries report every rejected date as 404.
    pub fn not_found(err: TerminError) -> Self {
        AppError::Engine(StatusCode::NOT_FOUND, err)
    }
}

impl From<TerminError> for AppError {
    fn from(err: TerminError) -> Self {
        let status = match err.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Conflict => StatusCode::CONFLICT,
            ErrorCategory::Configuration | ErrorCategory::Storage => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        AppError::Engine(status, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: msg,
                    code: None,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: msg,
                    code: None,
                },
            ),
            AppError::Engine(status, err) => {
                if status.is_server_error() {
                    tracing::error!("Request failed: {}", err);
                } else {
                    tracing::warn!("Request rejected: {}", err);
                }
                (
                    status,
                    ErrorBody {
                        error: err.to_string(),
                        code: Some(err.code().as_str().to_string()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
