//! Project store.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::SnapshotStore;
use crate::errors::AppError;
use crate::models::{CreateProjectRequest, Project, ProjectStatus, UpdateProjectRequest, User};

use super::seed;

const SNAPSHOT_KEY: &str = "projects";

/// Full projects state, persisted verbatim including `loading`/`error`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsState {
    pub projects: Vec<Project>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProjectsState {
    fn seeded() -> Self {
        Self {
            projects: seed::projects(),
            loading: false,
            error: None,
        }
    }
}

/// Store for project records. Creation is head-only; project names are
/// unique case-sensitively. Updates are not permission-checked here; the
/// frontend enforces edit permissions in its UI layer, and that split is
/// preserved.
pub struct ProjectStore {
    state: Mutex<ProjectsState>,
    backend: Arc<dyn SnapshotStore>,
}

impl ProjectStore {
    /// Restore from the persisted snapshot, or seed when none exists.
    pub async fn load(backend: Arc<dyn SnapshotStore>) -> Result<Self, AppError> {
        let state = match backend.load(SNAPSHOT_KEY).await? {
            Some(json) => serde_json::from_str(&json)?,
            None => ProjectsState::seeded(),
        };
        Ok(Self {
            state: Mutex::new(state),
            backend,
        })
    }

    async fn persist(&self, state: &ProjectsState) -> Result<(), AppError> {
        let json = serde_json::to_string(state)?;
        self.backend.save(SNAPSHOT_KEY, &json).await
    }

    pub async fn list(&self) -> Vec<Project> {
        self.state.lock().await.projects.clone()
    }

    pub async fn get(&self, id: i64) -> Option<Project> {
        self.state
            .lock()
            .await
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn current_state(&self) -> ProjectsState {
        self.state.lock().await.clone()
    }

    /// Create a project. Fails closed unless the acting user is a head;
    /// the forbidden path skips the snapshot write. Status is always
    /// `planning` regardless of input.
    pub async fn create_project(
        &self,
        req: CreateProjectRequest,
        acting: Option<&User>,
    ) -> Result<Project, AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        if !acting.map(|u| u.user_type.is_head()).unwrap_or(false) {
            let err = AppError::Forbidden("Only administrators can create projects".to_string());
            state.error = Some(err.message());
            state.loading = false;
            return Err(err);
        }

        let result = if state.projects.iter().any(|p| p.name == req.name) {
            Err(AppError::DuplicateName(
                "Project with this name already exists".to_string(),
            ))
        } else {
            let now = Utc::now().to_rfc3339();
            let project = Project {
                id: state.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1,
                name: req.name,
                description: req.description,
                team_id: req.team_id,
                status: ProjectStatus::Planning,
                priority: req.priority,
                start_date: req.start_date,
                end_date: req.end_date,
                created_at: now.clone(),
                updated_at: now,
            };
            state.projects.push(project.clone());
            Ok(project)
        };

        if let Err(err) = &result {
            state.error = Some(err.message());
        }
        state.loading = false;
        self.persist(&state).await?;
        result
    }

    /// Merge-update a project. The duplicate-name check runs only when the
    /// name actually changes, and that failure path skips the snapshot
    /// write; not-found persists.
    pub async fn update_project(
        &self,
        id: i64,
        req: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let Some(idx) = state.projects.iter().position(|p| p.id == id) else {
            let err = AppError::NotFound("Project not found".to_string());
            state.error = Some(err.message());
            state.loading = false;
            self.persist(&state).await?;
            return Err(err);
        };

        if req.name != state.projects[idx].name
            && state
                .projects
                .iter()
                .any(|p| p.name == req.name && p.id != id)
        {
            let err =
                AppError::DuplicateName("Project with this name already exists".to_string());
            state.error = Some(err.message());
            state.loading = false;
            return Err(err);
        }

        let project = &mut state.projects[idx];
        project.name = req.name;
        project.description = req.description;
        project.team_id = req.team_id;
        project.status = req.status;
        project.priority = req.priority;
        project.start_date = req.start_date;
        project.end_date = req.end_date;
        project.updated_at = Utc::now().to_rfc3339();
        let updated = project.clone();

        state.loading = false;
        self.persist(&state).await?;
        Ok(updated)
    }

    /// Remove a project. Tasks referencing it are left dangling. Persists
    /// on both paths.
    pub async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let result = match state.projects.iter().position(|p| p.id == id) {
            None => Err(AppError::NotFound("Project not found".to_string())),
            Some(idx) => {
                state.projects.remove(idx);
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
