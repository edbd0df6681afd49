//! Unified JSON response envelope.
//!
//! Every endpoint answers with the same shape:
//!
//! ```json
//! { "success": true,  "message": "…", "data": { … } }
//! { "success": false, "message": "…", "error": "SOME_CODE" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::ErrorCode;

/// Unified API response structure.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
}

/// 200 OK with a payload.
pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }),
    )
        .into_response()
}

/// 201 Created with a payload.
pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }),
    )
        .into_response()
}

/// Error body used by [`crate::error::ApiError`]'s `IntoResponse`.
pub fn failure(status: StatusCode, message: impl Into<String>, code: ErrorCode) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            message: message.into(),
            data: None,
            error: Some(code),
        }),
    )
        .into_response()
}
