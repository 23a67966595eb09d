//! Error types for oracle-scan
//!
//! `ApiError` renders as a JSON body for the `/api` routes. Page routes wrap
//! it in `PageError`, which renders the same status with a small HTML page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::camera::CameraError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upload body over the configured limit (413)
    #[error("Payload too large: {0}")]
    TooLarge(String),

    /// Camera binary missing or capture failed (500)
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// oracle-common error
    #[error("Common error: {0}")]
    Common(#[from] oracle_common::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Camera(_)
            | ApiError::Internal(_)
            | ApiError::Io(_)
            | ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::TooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::Camera(_) => "CAMERA_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
            ApiError::Io(_) => "IO_ERROR",
            ApiError::Common(_) => "COMMON_ERROR",
        }
    }

    /// Human-readable message shown to the client
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::TooLarge(msg)
            | ApiError::Internal(msg) => msg.clone(),
            ApiError::Camera(err) => err.user_message(),
            ApiError::Io(err) => err.to_string(),
            ApiError::Common(err) => err.to_string(),
        }
    }

    fn log_if_server_error(&self) {
        if self.status().is_server_error() {
            error!(code = self.code(), "{}", self);
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_if_server_error();

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.user_message(),
            }
        }));

        (self.status(), body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTML rendering of an `ApiError` for browser-facing routes
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.0.log_if_server_error();

        let body = format!(
            "<h3>{}</h3>",
            crate::api::ui::escape(&self.0.user_message())
        );
        (self.0.status(), Html(body)).into_response()
    }
}

/// Result type for HTML page handlers
pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Camera(CameraError::NotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Common(oracle_common::Error::Config("bad".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_camera_not_found_message_mentions_install() {
        let msg = ApiError::Camera(CameraError::NotFound).user_message();
        assert!(msg.contains("rpicam-apps"));
    }
}
