//! User/employee API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, success_with, ApiResult};
use crate::errors::AppError;
use crate::models::{AssignTeamRequest, CreateUserRequest, UpdateUserRequest, User};
use crate::AppState;

/// GET /api/users - List all users/employees.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    success(state.users.list().await)
}

/// GET /api/users/:id - Get a single user/employee.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<User> {
    match state.users.get(id).await {
        Some(user) => success(user),
        None => Err(AppError::NotFound("Employee not found".to_string())),
    }
}

/// POST /api/users - Create a new user/employee.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<User> {
    let user = state.users.create_user(request).await?;
    success_with(user, "Employee created successfully")
}

/// PUT /api/users/:id - Update a user/employee.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<User> {
    let user = state.users.update_user(id, request).await?;
    success_with(user, "Employee updated successfully")
}

/// DELETE /api/users/:id - Delete a user/employee.
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.users.delete_user(id).await?;
    success_with((), "Employee deleted successfully")
}

/// PUT /api/users/:id/team - Assign a user to a team.
pub async fn assign_user_to_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AssignTeamRequest>,
) -> ApiResult<User> {
    let user = state.users.assign_user_to_team(id, request.team_id).await?;
    success_with(user, "Employee assigned to team successfully")
}

/// DELETE /api/users/:id/team - Remove a user from their team.
pub async fn remove_user_from_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<User> {
    let user = state.users.remove_user_from_team(id).await?;
    success_with(user, "Employee removed from team successfully")
}
