//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
///
/// A missing callback is deliberately not represented here: the wait
/// deadline is an expected operating condition of the asynchronous
/// downstream network and is answered on the success path of each
/// handler, not as an error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Server errors (5xx)
    #[error(transparent)]
    Dispatch(#[from] crate::downstream::DispatchError),

    #[error("Malformed downstream payload: {0}")]
    MalformedPayload(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error response body
///
/// `message` mirrors the facade contract; `error_code` is a stable
/// machine-readable discriminator.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error_code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),

            // 500 Internal Server Error
            AppError::Dispatch(e) => {
                tracing::error!(error = %e, "Downstream dispatch failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "dispatch_failed")
            }
            AppError::MalformedPayload(msg) => {
                tracing::error!(error = %msg, "Malformed downstream payload");
                (StatusCode::INTERNAL_SERVER_ERROR, "malformed_payload")
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error")
            }
        };

        let body = ErrorResponse {
            message: self.to_string(),
            error_code: error_code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
