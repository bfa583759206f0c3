//! User store: accounts, credentials, and the login session.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::auth::passwords_match;
use crate::db::SnapshotStore;
use crate::errors::AppError;
use crate::models::{
    CreateUserRequest, LoginRequest, PasswordResetRequest, SessionInfo, UpdateUserRequest, User,
};

use super::seed;

const SNAPSHOT_KEY: &str = "auth";

/// Full auth state, persisted verbatim including the transient
/// `loading`/`error` fields and the logged-in session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub users: Vec<User>,
    pub current_user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    fn seeded() -> Self {
        Self {
            users: seed::users(),
            current_user: None,
            is_authenticated: false,
            loading: false,
            error: None,
        }
    }
}

/// Store for accounts and the current session. Every mutation rewrites the
/// whole state snapshot; failed mutations record their message in `error`
/// and leave the collection untouched.
pub struct UserStore {
    state: Mutex<AuthState>,
    backend: Arc<dyn SnapshotStore>,
}

impl UserStore {
    /// Restore from the persisted snapshot, or seed when none exists.
    pub async fn load(backend: Arc<dyn SnapshotStore>) -> Result<Self, AppError> {
        let state = match backend.load(SNAPSHOT_KEY).await? {
            Some(json) => serde_json::from_str(&json)?,
            None => AuthState::seeded(),
        };
        Ok(Self {
            state: Mutex::new(state),
            backend,
        })
    }

    async fn persist(&self, state: &AuthState) -> Result<(), AppError> {
        let json = serde_json::to_string(state)?;
        self.backend.save(SNAPSHOT_KEY, &json).await
    }

    pub async fn list(&self) -> Vec<User> {
        self.state.lock().await.users.clone()
    }

    pub async fn get(&self, id: i64) -> Option<User> {
        self.state.lock().await.users.iter().find(|u| u.id == id).cloned()
    }

    pub async fn session(&self) -> SessionInfo {
        let state = self.state.lock().await;
        SessionInfo {
            current_user: state.current_user.clone(),
            is_authenticated: state.is_authenticated,
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.is_authenticated
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn current_state(&self) -> AuthState {
        self.state.lock().await.clone()
    }

    /// Authenticate by username and password. A failed attempt leaves the
    /// session fields untouched. Persists on both paths.
    pub async fn login(&self, req: LoginRequest) -> Result<User, AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let found = state
            .users
            .iter()
            .find(|u| u.username == req.username)
            .cloned();

        let result = match found {
            Some(user) if passwords_match(&user.password, &req.password) => {
                state.current_user = Some(user.clone());
                state.is_authenticated = true;
                tracing::info!(username = %user.username, role = user.user_type.as_str(), "user logged in");
                Ok(user)
            }
            _ => {
                let err = AppError::InvalidCredentials;
                state.error = Some(err.message());
                Err(err)
            }
        };

        state.loading = false;
        self.persist(&state).await?;
        result
    }

    /// Clear the session. Persists.
    pub async fn logout(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.current_user = None;
        state.is_authenticated = false;
        state.error = None;
        self.persist(&state).await
    }

    /// Create a user/employee. Username and email must be unique
    /// (case-sensitive). Persists on both paths.
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let result = if state.users.iter().any(|u| u.username == req.username) {
            Err(AppError::DuplicateUsername)
        } else if state.users.iter().any(|u| u.email == req.email) {
            Err(AppError::DuplicateEmail)
        } else {
            let id = state.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
            let user = User {
                id,
                name: req
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| req.username.clone()),
                username: req.username,
                password: req.password,
                email: req.email,
                user_type: req.user_type.unwrap_or_default(),
                team_id: req.team_id,
                created_at: Utc::now().to_rfc3339(),
                updated_at: None,
            };
            state.users.push(user.clone());
            Ok(user)
        };

        if let Err(err) = &result {
            state.error = Some(err.message());
        }
        state.loading = false;
        self.persist(&state).await?;
        result
    }

    /// Update a user/employee in place, keeping the previous password when
    /// the payload's is missing or empty. Persists on both paths.
    pub async fn update_user(&self, id: i64, req: UpdateUserRequest) -> Result<User, AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let result = match state.users.iter().position(|u| u.id == id) {
            None => Err(AppError::NotFound("Employee not found".to_string())),
            Some(idx) => {
                let username_taken = state
                    .users
                    .iter()
                    .any(|u| u.id != id && u.username == req.username);
                let email_taken = state
                    .users
                    .iter()
                    .any(|u| u.id != id && u.email == req.email);

                if username_taken {
                    Err(AppError::DuplicateUsername)
                } else if email_taken {
                    Err(AppError::DuplicateEmail)
                } else {
                    let user = &mut state.users[idx];
                    user.username = req.username;
                    if let Some(password) = req.password.filter(|p| !p.is_empty()) {
                        user.password = password;
                    }
                    user.name = req.name;
                    user.email = req.email;
                    user.user_type = req.user_type;
                    user.team_id = req.team_id;
                    user.updated_at = Some(Utc::now().to_rfc3339());
                    Ok(user.clone())
                }
            }
        };

        if let Err(err) = &result {
            state.error = Some(err.message());
        }
        state.loading = false;
        self.persist(&state).await?;
        result
    }

    /// Remove a user/employee. Tasks assigned to the removed user keep
    /// their dangling reference. Persists on both paths.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let result = match state.users.iter().position(|u| u.id == id) {
            None => Err(AppError::NotFound("Employee not found".to_string())),
            Some(idx) => {
                state.users.remove(idx);
                Ok(())
            }
        };

        if let Err(err) = &result {
            state.error = Some(err.message());
        }
        state.loading = false;
        self.persist(&state).await?;
        result
    }

    /// Set a user's team reference. Persists on both paths.
    pub async fn assign_user_to_team(&self, user_id: i64, team_id: i64) -> Result<User, AppError> {
        self.set_team(user_id, Some(team_id)).await
    }

    /// Clear a user's team reference. Persists on both paths.
    pub async fn remove_user_from_team(&self, user_id: i64) -> Result<User, AppError> {
        self.set_team(user_id, None).await
    }

    async fn set_team(&self, user_id: i64, team_id: Option<i64>) -> Result<User, AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let result = match state.users.iter().position(|u| u.id == user_id) {
            None => Err(AppError::NotFound("Employee not found".to_string())),
            Some(idx) => {
                let user = &mut state.users[idx];
                user.team_id = team_id;
                user.updated_at = Some(Utc::now().to_rfc3339());
                Ok(user.clone())
            }
        };

        if let Err(err) = &result {
            state.error = Some(err.message());
        }
        state.loading = false;
        self.persist(&state).await?;
        result
    }

    /// Overwrite the password for the account with this email. The failure
    /// path skips the snapshot write; `reset_password` does not.
    pub async fn forgot_password(&self, req: PasswordResetRequest) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let Some(idx) = state.users.iter().position(|u| u.email == req.email) else {
            let err =
                AppError::AccountNotFound("No account found with this email address".to_string());
            state.error = Some(err.message());
            state.loading = false;
            return Err(err);
        };

        state.users[idx].password = req.new_password;
        state.loading = false;
        self.persist(&state).await?;
        Ok(())
    }

    /// Overwrite the password for the account with this email. No
    /// old-password confirmation. Persists on both paths.
    pub async fn reset_password(&self, req: PasswordResetRequest) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let result = match state.users.iter().position(|u| u.email == req.email) {
            None => Err(AppError::AccountNotFound(
                "Invalid reset token or email".to_string(),
            )),
            Some(idx) => {
                state.users[idx].password = req.new_password;
                Ok(())
            }
        };

        if let Err(err) = &result {
            state.error = Some(err.message());
        }
        state.loading = false;
        self.persist(&state).await?;
        result
    }

    /// Clear the transient error in memory only; no snapshot write.
    pub async fn clear_error(&self) {
        self.state.lock().await.error = None;
    }
}
