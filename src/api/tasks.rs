//! Task API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, success_with, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest, UpdateTaskStatusRequest};
use crate::AppState;

/// GET /api/tasks - List all tasks.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Vec<Task>> {
    success(state.tasks.list().await)
}

/// GET /api/tasks/:id - Get a single task.
pub async fn get_task(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Task> {
    match state.tasks.get(id).await {
        Some(task) => success(task),
        None => Err(AppError::NotFound("Task not found".to_string())),
    }
}

/// POST /api/tasks - Create a new task (head only).
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<Task> {
    let acting = state.users.session().await.current_user;
    let task = state.tasks.create_task(request, acting.as_ref()).await?;
    success_with(task, "Task created successfully")
}

/// PUT /api/tasks/:id - Update a task.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTaskRequest>,
) -> ApiResult<Task> {
    let task = state.tasks.update_task(id, request).await?;
    success_with(task, "Task updated successfully")
}

/// PUT /api/tasks/:id/status - Board drag-and-drop status change.
///
/// Returns 200 with `data: null` when the task no longer exists; the
/// board treats that drop as a no-op rather than an error.
pub async fn update_task_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTaskStatusRequest>,
) -> ApiResult<Option<Task>> {
    let task = state.tasks.update_task_status(id, request.status).await?;
    success(task)
}

/// DELETE /api/tasks/:id - Delete a task.
pub async fn delete_task(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.tasks.delete_task(id).await?;
    success_with((), "Task deleted successfully")
}
