//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain and client errors to HTTP status codes with a JSON body of
//! error code, message, and optional details. Upstream and internal
//! failures are logged but their messages never reach the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aisle_client::IdentityError;
use aisle_core::ValidationError;
use aisle_sync::SyncError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "UNAUTHORIZED", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context, present only where it is safe to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// No valid session (401). The body carries `{"redirect": "/login"}`
    /// so clients know where to send the user.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Request input failed validation (422).
    #[error("{0}")]
    Validation(String),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The identity service or record store failed or is unreachable (502).
    /// Message is logged but not returned to the client.
    #[error("upstream service error: {0}")]
    Upstream(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal/upstream error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Upstream(_) => "An upstream service error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream(_) => tracing::error!(error = %self, "upstream service error"),
            _ => {}
        }

        let details = match &self {
            Self::Unauthorized(_) => Some(serde_json::json!({ "redirect": "/login" })),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        if err.is_auth_failure() {
            Self::Unauthorized(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

impl From<SyncError> for AppError {
    fn from(err: SyncError) -> Self {
        match &err {
            SyncError::UnknownRecord { .. } => Self::NotFound(err.to_string()),
            SyncError::Fetch { .. } | SyncError::Write { .. } => Self::Upstream(err.to_string()),
        }
    }
}
