//! Error types for the PDV API.
//!
//! Every failure leaves the server as `{ "message": ... }` with one of four
//! status codes. Internal failures are logged here and replaced with a
//! generic message so nothing about the store leaks to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use pdv_core::CoreError;
use pdv_store::StoreError;

/// Message sent for a failed login, whichever field was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// PDV API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or rule-breaking request (400)
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Bad credentials (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Unexpected failure (500); the detail is logged, not returned
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Not-found error naming the entity, e.g. "Sale not found".
    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(format!("{} not found", entity))
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "Request failed");
                "Internal server error".to_string()
            }
            ApiError::Validation(msg) | ApiError::NotFound(msg) | ApiError::Unauthorized(msg) => {
                msg
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        if error.is_client_error() {
            ApiError::Validation(error.to_string())
        } else {
            ApiError::Internal(error.to_string())
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation { .. } | StoreError::ForeignKeyViolation { .. } => {
                ApiError::Validation(error.to_string())
            }
            StoreError::Domain(core) => core.into(),
        }
    }
}

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
