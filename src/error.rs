// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// Store failures carry a fixed public message chosen at the call site and
/// a detail string that is logged but never exposed to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database connection is not ready")]
    NotReady,

    #[error("{0}")]
    BadRequest(String),

    #[error("no user found")]
    UserNotFound,

    #[error("{message}")]
    Database {
        message: &'static str,
        detail: String,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap a store failure with the public message the endpoint contract
    /// requires for this call site.
    pub fn db(message: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Database {
            message,
            detail: err.to_string(),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::NotReady => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error connecting to the database!".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "No user found!".to_string()),
            AppError::Database { message, detail } => {
                tracing::error!(error = %detail, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse { error };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
