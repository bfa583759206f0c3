//! Session-based authentication module.
//!
//! The login session lives in the user store; the guard here is the
//! backend half of the frontend's "is a user logged in" routing guard.
//! Password comparison is constant-time to mitigate timing attacks even
//! though the stored passwords themselves are plaintext.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, ErrorDetails, ErrorResponse};
use crate::AppState;

/// Reject requests until a user has logged in.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.users.is_authenticated().await {
        next.run(request).await
    } else {
        unauthorized_response("Login required")
    }
}

/// Constant-time password comparison.
pub fn passwords_match(stored: &str, provided: &str) -> bool {
    stored.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
        },
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
