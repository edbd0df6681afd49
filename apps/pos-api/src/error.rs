//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Toko POS                               │
//! │                                                                         │
//! │  Handler                                                                │
//! │  Result<Response, ApiError>                                             │
//! │         │                                                               │
//! │         ├── ValidationError (toko-core) ──► 422, VALIDATION_ERROR       │
//! │         ├── CoreError::EmptyCheckout    ──► 400, BUSINESS_RULE          │
//! │         ├── DbError::ProductNotFound    ──► 400, BUSINESS_RULE          │
//! │         ├── DbError::InsufficientStock  ──► 400, BUSINESS_RULE          │
//! │         ├── DbError::NotFound           ──► 404, NOT_FOUND              │
//! │         ├── DbError::Busy               ──► 409, CONFLICT (retryable)   │
//! │         └── DbError::*                  ──► 5xx, DATABASE_ERROR         │
//! │                                                                         │
//! │  Checkout business failures are 400s whose message identifies the      │
//! │  offending product. The 409 is deliberately distinguishable: a caller  │
//! │  may re-issue the checkout, knowing a retry creates a NEW transaction. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::response::failure;
use toko_core::{CoreError, ValidationError};
use toko_db::DbError;

/// Machine-readable error codes for programmatic handling.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (422)
    ValidationError,

    /// Business rule violation: empty cart, unknown product in a
    /// checkout, insufficient stock (400)
    BusinessRule,

    /// Retryable concurrency conflict (409)
    Conflict,

    /// Database operation failed (500)
    DatabaseError,

    /// Temporarily out of capacity (503)
    Unavailable,

    /// Anything else (500)
    Internal,
}

/// API error returned from handlers.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for display
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{entity} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn business(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BusinessRule, message)
    }

    fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::BusinessRule => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(code = ?self.code, message = %self.message, "Request failed");
        }

        failure(status, self.message, self.code)
    }
}

/// Database failures keep their checkout-specific variants distinguishable;
/// everything infrastructural collapses to a 500.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),

            // Checkout business outcomes: 400, message names the product.
            DbError::ProductNotFound(_) | DbError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::BusinessRule, err.to_string())
            }

            // Duplicate names / invalid references from client input.
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                ApiError::new(ErrorCode::BusinessRule, err.to_string())
            }

            // Retryable: a concurrent checkout held the write lock too long.
            DbError::Busy => ApiError::new(
                ErrorCode::Conflict,
                "checkout conflicted with a concurrent request, retry safely",
            ),

            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::Unavailable, "database connections exhausted")
            }

            DbError::ConnectionFailed(_)
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::Internal(_) => ApiError::new(ErrorCode::DatabaseError, err.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            // Malformed field values are validation failures (422).
            CoreError::Validation(e) => ApiError::validation(e.to_string()),

            // Cart-shape violations are business failures (400) whose
            // message carries the offending product where applicable.
            CoreError::EmptyCheckout
            | CoreError::InvalidQuantity { .. }
            | CoreError::TooManyItems { .. }
            | CoreError::ProductNotFound(_)
            | CoreError::InsufficientStock { .. } => ApiError::business(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}
