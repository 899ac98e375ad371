//! Inkfair — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use inkfair_core::error::DomainError;
use inkfair_core::id::DomainId;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema bootstrap error.
    #[error("schema error: {0}")]
    Schema(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error for route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// A domain error propagated from the core.
    Domain(DomainError),
    /// A route addressed an aggregate that does not exist.
    NotFound {
        /// The aggregate kind, e.g. `"shop"`.
        resource: &'static str,
        /// The identifier that did not resolve.
        id: DomainId,
    },
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{resource} {id} does not exist"),
            ),
            Self::Domain(err) => {
                let (status, code) = match &err {
                    DomainError::InvalidIdentifier(_) => {
                        (StatusCode::BAD_REQUEST, "invalid_identifier")
                    }
                    DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                    DomainError::ConstraintViolation { .. } => {
                        (StatusCode::CONFLICT, "constraint_violation")
                    }
                    DomainError::StorageUnavailable(_) => {
                        (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
                    }
                    DomainError::HandlerFailure { .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "handler_failure")
                    }
                };
                (status, code, err.to_string())
            }
        };

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}
