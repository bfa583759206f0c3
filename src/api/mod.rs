//! REST API module.
//!
//! Thin handlers over the domain stores: deserialize a typed request, call
//! the store operation, wrap the outcome in the response envelope. The
//! optional `message` carries the toast text the frontend shows.

mod auth;
mod projects;
mod tasks;
mod teams;
mod users;

pub use auth::*;
pub use projects::*;
pub use tasks::*;
pub use teams::*;
pub use users::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse {
        success: true,
        data,
        message: None,
    })
}

/// Create a successful API response with a user-facing message.
pub fn success_with<T: Serialize>(data: T, message: impl Into<String>) -> ApiResult<T> {
    Ok(ApiResponse {
        success: true,
        data,
        message: Some(message.into()),
    })
}
