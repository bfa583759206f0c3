//! Project API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, success_with, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateProjectRequest, Project, UpdateProjectRequest};
use crate::AppState;

/// GET /api/projects - List all projects.
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    success(state.projects.list().await)
}

/// GET /api/projects/:id - Get a single project.
pub async fn get_project(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Project> {
    match state.projects.get(id).await {
        Some(project) => success(project),
        None => Err(AppError::NotFound("Project not found".to_string())),
    }
}

/// POST /api/projects - Create a new project (head only).
pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> ApiResult<Project> {
    let acting = state.users.session().await.current_user;
    let project = state.projects.create_project(request, acting.as_ref()).await?;
    success_with(project, "Project created successfully")
}

/// PUT /api/projects/:id - Update a project.
///
/// No role check here; edit permissions are a frontend concern, matching
/// the store contract.
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateProjectRequest>,
) -> ApiResult<Project> {
    let project = state.projects.update_project(id, request).await?;
    success_with(project, "Project updated successfully")
}

/// DELETE /api/projects/:id - Delete a project.
pub async fn delete_project(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.projects.delete_project(id).await?;
    success_with((), "Project deleted successfully")
}
