//! Session API endpoints.

use axum::{extract::State, Json};

use super::{success, success_with, ApiResult};
use crate::models::{LoginRequest, PasswordResetRequest, SessionInfo, User};
use crate::AppState;

/// POST /api/auth/login - Authenticate and open the session.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<User> {
    let user = state.users.login(request).await?;
    let message = format!("{} logged in successfully", user.name);
    success_with(user, message)
}

/// POST /api/auth/logout - Clear the session.
pub async fn logout(State(state): State<AppState>) -> ApiResult<()> {
    state.users.logout().await?;
    success(())
}

/// GET /api/auth/session - Current session for the routing guard.
pub async fn get_session(State(state): State<AppState>) -> ApiResult<SessionInfo> {
    success(state.users.session().await)
}

/// POST /api/auth/forgot-password - Overwrite a password by email.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetRequest>,
) -> ApiResult<()> {
    state.users.forgot_password(request).await?;
    success_with((), "Password updated successfully")
}

/// POST /api/auth/reset-password - Overwrite a password by email.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetRequest>,
) -> ApiResult<()> {
    state.users.reset_password(request).await?;
    success_with((), "Password reset successfully")
}
