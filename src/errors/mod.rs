//! Error handling module for the project management backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and
//! response envelopes. Store mutations recover from every variant except
//! `Storage`: the failing operation records its message in the store's
//! `error` field and the store stays usable.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const DUPLICATE_USERNAME: &str = "DUPLICATE_USERNAME";
    pub const DUPLICATE_EMAIL: &str = "DUPLICATE_EMAIL";
    pub const DUPLICATE_NAME: &str = "DUPLICATE_NAME";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const ACCOUNT_NOT_FOUND: &str = "ACCOUNT_NOT_FOUND";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Another user already holds this username (case-sensitive)
    DuplicateUsername,
    /// Another user already holds this email
    DuplicateEmail,
    /// A team (case-insensitive) or project (case-sensitive) name collision
    DuplicateName(String),
    /// Entity not found
    NotFound(String),
    /// Head-only action attempted by a non-head user
    Forbidden(String),
    /// Login failed
    InvalidCredentials,
    /// Password recovery for an unknown email
    AccountNotFound(String),
    /// No logged-in session
    Unauthorized(String),
    /// Snapshot serialization or SQLite failure
    Storage(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateUsername => StatusCode::CONFLICT,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::DuplicateName(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::AccountNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::DuplicateUsername => codes::DUPLICATE_USERNAME,
            AppError::DuplicateEmail => codes::DUPLICATE_EMAIL,
            AppError::DuplicateName(_) => codes::DUPLICATE_NAME,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Forbidden(_) => codes::FORBIDDEN,
            AppError::InvalidCredentials => codes::INVALID_CREDENTIALS,
            AppError::AccountNotFound(_) => codes::ACCOUNT_NOT_FOUND,
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Storage(_) => codes::STORAGE_ERROR,
        }
    }

    /// Get the user-facing error message. The fixed-message variants use
    /// the exact strings the frontend toasts expect.
    pub fn message(&self) -> String {
        match self {
            AppError::DuplicateUsername => "Username already exists".to_string(),
            AppError::DuplicateEmail => "Email already exists".to_string(),
            AppError::DuplicateName(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid username or password".to_string(),
            AppError::AccountNotFound(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Storage(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Snapshot storage error: {:?}", err);
        AppError::Storage(format!("Snapshot storage error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Snapshot serialization error: {:?}", err);
        AppError::Storage(format!("Snapshot serialization error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
