//! API error type and its mapping to transport status codes.
//!
//! Handlers never leak raw store errors: storage failures are logged in
//! full and reach the client either verbatim (development) or as a generic
//! message (production). Validation failures carry the field→message map.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taskmaster_core::FieldErrors;
use taskmaster_xml::XmlError;

use crate::config::ServerConfig;

/// Errors a route handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Field-level validation failed (422).
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// The requested resource does not exist for this user (404).
    #[error("{0}")]
    NotFound(String),

    /// The request itself is malformed (400).
    #[error("{0}")]
    BadRequest(String),

    /// Internal failure (500). The message has already been sanitized for
    /// the current environment.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Standard not-found error for tasks.
    pub fn task_not_found() -> Self {
        Self::NotFound("Task not found".into())
    }

    /// Wrap a storage failure: log the real error, expose detail only in
    /// development mode.
    pub fn storage(config: &ServerConfig, err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "storage failure");
        if config.environment.is_development() {
            Self::Internal(format!("Error: {err}"))
        } else {
            Self::Internal("An unexpected error occurred".into())
        }
    }

    /// Map a bridge error: a parse failure is the client's fault, anything
    /// else is a storage failure.
    pub fn from_xml(config: &ServerConfig, err: XmlError) -> Self {
        if err.is_parse() {
            Self::BadRequest(err.to_string())
        } else {
            Self::storage(config, err)
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errors = match &self {
            Self::Validation(errors) => json!(errors),
            _ => json!({}),
        };
        let body = json!({
            "success": false,
            "message": self.to_string(),
            "errors": errors,
        });
        (status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
