// ABOUTME: Unified error handling system with standard error kinds
// ABOUTME: Maps application errors to HTTP responses for the route layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// Application error taxonomy
///
/// `NotFound` is reserved for single-entity lookups the route layer maps to
/// 404; store operations that tolerate absence return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persistence collaborator failure (connection loss, constraint
    /// violation not absorbed by upsert logic, query error)
    #[error("Database error: {0}")]
    Database(String),

    /// Requested entity has no matching row
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request shape or value rejected at the boundary
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or unverifiable credentials
    #[error("Authentication failed: {0}")]
    AuthInvalid(String),

    /// Startup configuration error (missing or malformed environment)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Database operation failure
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Entity not found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Invalid request input
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Authentication failure
    pub fn auth_invalid(msg: impl Into<String>) -> Self {
        Self::AuthInvalid(msg.into())
    }

    /// Configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::AuthInvalid(_) => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Internal failure details stay in the logs, not the response body
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                "Internal server error".to_owned()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(format!("Database operation failed: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization failed: {err}"))
    }
}
