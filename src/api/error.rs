//! API error payloads
//!
//! Maps engine and guard errors to HTTP status codes with a JSON
//! `{"message": ...}` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::auth::GuardError;
use crate::error::OpsdeskError;

/// An HTTP-facing error: status code plus message envelope
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Create an error with an explicit status
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 403 Forbidden
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The message carried in the envelope
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

impl From<GuardError> for ApiError {
    fn from(err: GuardError) -> Self {
        let status = match err {
            GuardError::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        };
        Self::new(status, err.to_string())
    }
}

impl From<OpsdeskError> for ApiError {
    fn from(err: OpsdeskError) -> Self {
        let status = match &err {
            OpsdeskError::NotFound { .. } => StatusCode::NOT_FOUND,
            OpsdeskError::Validation(_) => StatusCode::BAD_REQUEST,
            OpsdeskError::Auth(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}
