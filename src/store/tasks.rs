//! Task store.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::SnapshotStore;
use crate::errors::AppError;
use crate::models::{CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest, User};

use super::seed;

const SNAPSHOT_KEY: &str = "tasks";

/// Full tasks state, persisted verbatim including `loading`/`error`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TasksState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TasksState {
    fn seeded() -> Self {
        Self {
            tasks: seed::tasks(),
            loading: false,
            error: None,
        }
    }
}

/// Store for board tasks. Creation is head-only; updates and the board
/// status change are open to any logged-in user, matching the frontend's
/// permission split.
pub struct TaskStore {
    state: Mutex<TasksState>,
    backend: Arc<dyn SnapshotStore>,
}

impl TaskStore {
    /// Restore from the persisted snapshot, or seed when none exists.
    pub async fn load(backend: Arc<dyn SnapshotStore>) -> Result<Self, AppError> {
        let state = match backend.load(SNAPSHOT_KEY).await? {
            Some(json) => serde_json::from_str(&json)?,
            None => TasksState::seeded(),
        };
        Ok(Self {
            state: Mutex::new(state),
            backend,
        })
    }

    async fn persist(&self, state: &TasksState) -> Result<(), AppError> {
        let json = serde_json::to_string(state)?;
        self.backend.save(SNAPSHOT_KEY, &json).await
    }

    pub async fn list(&self) -> Vec<Task> {
        self.state.lock().await.tasks.clone()
    }

    pub async fn get(&self, id: i64) -> Option<Task> {
        self.state
            .lock()
            .await
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn current_state(&self) -> TasksState {
        self.state.lock().await.clone()
    }

    /// Create a task. Fails closed unless the acting user is a head; the
    /// forbidden path skips the snapshot write. Status is always `todo`;
    /// the project and assignee references are not existence-checked.
    pub async fn create_task(
        &self,
        req: CreateTaskRequest,
        acting: Option<&User>,
    ) -> Result<Task, AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        if !acting.map(|u| u.user_type.is_head()).unwrap_or(false) {
            let err = AppError::Forbidden("Only administrators can create tasks".to_string());
            state.error = Some(err.message());
            state.loading = false;
            return Err(err);
        }

        let now = Utc::now().to_rfc3339();
        let task = Task {
            id: state.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            title: req.title,
            description: req.description,
            project_id: req.project_id,
            assigned_to: req.assigned_to,
            status: TaskStatus::Todo,
            priority: req.priority,
            due_date: req.due_date,
            created_at: now.clone(),
            updated_at: now,
        };
        state.tasks.push(task.clone());

        state.loading = false;
        self.persist(&state).await?;
        Ok(task)
    }

    /// Merge-update a task, preserving the current `project_id` and
    /// `status` when the payload omits them. Persists on both paths.
    pub async fn update_task(&self, id: i64, req: UpdateTaskRequest) -> Result<Task, AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let result = match state.tasks.iter().position(|t| t.id == id) {
            None => Err(AppError::NotFound("Task not found".to_string())),
            Some(idx) => {
                let task = &mut state.tasks[idx];
                task.title = req.title;
                task.description = req.description;
                if let Some(project_id) = req.project_id {
                    task.project_id = project_id;
                }
                task.assigned_to = req.assigned_to;
                if let Some(status) = req.status {
                    task.status = status;
                }
                task.priority = req.priority;
                task.due_date = req.due_date;
                task.updated_at = Utc::now().to_rfc3339();
                Ok(task.clone())
            }
        };

        if let Err(err) = &result {
            state.error = Some(err.message());
        }
        state.loading = false;
        self.persist(&state).await?;
        result
    }

    /// Board drag-and-drop status change. Accepts any status for any
    /// caller, and an unknown id is a silent no-op with no snapshot write
    /// and no error recorded; a drop on a card deleted mid-drag must not
    /// surface anything.
    pub async fn update_task_status(
        &self,
        id: i64,
        status: TaskStatus,
    ) -> Result<Option<Task>, AppError> {
        let mut state = self.state.lock().await;

        match state.tasks.iter().position(|t| t.id == id) {
            None => Ok(None),
            Some(idx) => {
                state.tasks[idx].status = status;
                state.tasks[idx].updated_at = Utc::now().to_rfc3339();
                let updated = state.tasks[idx].clone();
                tracing::debug!(task_id = id, status = status.as_str(), "task moved");
                self.persist(&state).await?;
                Ok(Some(updated))
            }
        }
    }

    /// Remove a task. Persists on both paths.
    pub async fn delete_task(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let result = match state.tasks.iter().position(|t| t.id == id) {
            None => Err(AppError::NotFound("Task not found".to_string())),
            Some(idx) => {
                state.tasks.remove(idx);
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
