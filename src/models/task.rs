//! Task model matching the frontend Task interface.

use serde::{Deserialize, Serialize};

use super::project::Priority;

/// Board column a task sits in. The store accepts any transition,
/// including the reopen cycle `completed -> todo`; column sequencing is a
/// UI affordance, not a store invariant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

/// A task on the board, referencing a project and an assignee by id.
/// Neither reference is existence-checked at write time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub project_id: i64,
    pub assigned_to: i64,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new task. Status is not accepted here:
/// creation always yields `todo`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub project_id: i64,
    pub assigned_to: i64,
    pub priority: Priority,
    pub due_date: String,
}

/// Request body for updating an existing task.
///
/// `project_id` and `status` keep their current values when omitted; the
/// form that drives this endpoint does not always send them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub project_id: Option<i64>,
    pub assigned_to: i64,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    pub priority: Priority,
    pub due_date: String,
}

/// Request body for the board drag-and-drop status change.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}
