//! User/employee model matching the frontend account shape.

use serde::{Deserialize, Serialize};

/// Role deciding administrative permissions (head = admin).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Employee,
    Head,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Employee => "employee",
            UserRole::Head => "head",
        }
    }

    pub fn is_head(&self) -> bool {
        matches!(self, UserRole::Head)
    }
}

/// An account: credentials, role, optional team assignment.
///
/// The password is stored in plaintext because the frontend contract keeps
/// the whole users collection client-side. Known insecurity, replicated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub user_type: UserRole,
    pub team_id: Option<i64>,
    pub created_at: String,
    /// Set on first mutation only; absent in freshly created accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request body for logging in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for creating a new user/employee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    /// Defaults to the username when omitted.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_type: Option<UserRole>,
    #[serde(default)]
    pub team_id: Option<i64>,
}

/// Request body for updating an existing user/employee.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: String,
    /// The existing password is kept when this is omitted or empty.
    #[serde(default)]
    pub password: Option<String>,
    pub name: String,
    pub email: String,
    pub user_type: UserRole,
    #[serde(default)]
    pub team_id: Option<i64>,
}

/// Request body for assigning a user to a team.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTeamRequest {
    pub team_id: i64,
}

/// Request body for the forgot-password and reset-password flows.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub email: String,
    pub new_password: String,
}

/// Current session as seen by the frontend routing guard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub current_user: Option<User>,
    pub is_authenticated: bool,
}
