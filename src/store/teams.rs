//! Team store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::SnapshotStore;
use crate::errors::AppError;
use crate::models::{CreateTeamRequest, Team, UpdateTeamRequest};

use super::seed;

const SNAPSHOT_KEY: &str = "teams";

/// Full teams state, persisted verbatim including `loading`/`error`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamsState {
    pub teams: Vec<Team>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TeamsState {
    fn seeded() -> Self {
        Self {
            teams: seed::teams(),
            loading: false,
            error: None,
        }
    }
}

/// Store for team records. Team names are unique case-insensitively;
/// deleting a team leaves users and projects pointing at it untouched.
pub struct TeamStore {
    state: Mutex<TeamsState>,
    backend: Arc<dyn SnapshotStore>,
}

impl TeamStore {
    /// Restore from the persisted snapshot, or seed when none exists.
    pub async fn load(backend: Arc<dyn SnapshotStore>) -> Result<Self, AppError> {
        let state = match backend.load(SNAPSHOT_KEY).await? {
            Some(json) => serde_json::from_str(&json)?,
            None => TeamsState::seeded(),
        };
        Ok(Self {
            state: Mutex::new(state),
            backend,
        })
    }

    async fn persist(&self, state: &TeamsState) -> Result<(), AppError> {
        let json = serde_json::to_string(state)?;
        self.backend.save(SNAPSHOT_KEY, &json).await
    }

    pub async fn list(&self) -> Vec<Team> {
        self.state.lock().await.teams.clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn current_state(&self) -> TeamsState {
        self.state.lock().await.clone()
    }

    /// Create a team. Persists on both paths.
    pub async fn create_team(&self, req: CreateTeamRequest) -> Result<Team, AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let name_taken = state
            .teams
            .iter()
            .any(|t| t.name.to_lowercase() == req.name.to_lowercase());

        let result = if name_taken {
            Err(AppError::DuplicateName("Team name already exists".to_string()))
        } else {
            let team = Team {
                id: state.teams.iter().map(|t| t.id).max().unwrap_or(0) + 1,
                name: req.name,
                description: req.description,
            };
            state.teams.push(team.clone());
            Ok(team)
        };

        if let Err(err) = &result {
            state.error = Some(err.message());
        }
        state.loading = false;
        self.persist(&state).await?;
        result
    }

    /// Replace a team record wholesale from the payload (not a field
    /// merge). Persists on both paths.
    pub async fn update_team(&self, id: i64, req: UpdateTeamRequest) -> Result<Team, AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let result = match state.teams.iter().position(|t| t.id == id) {
            None => Err(AppError::NotFound("Team not found".to_string())),
            Some(idx) => {
                let name_taken = state
                    .teams
                    .iter()
                    .any(|t| t.id != id && t.name.to_lowercase() == req.name.to_lowercase());

                if name_taken {
                    Err(AppError::DuplicateName("Team name already exists".to_string()))
                } else {
                    let team = Team {
                        id,
                        name: req.name,
                        description: req.description,
                    };
                    state.teams[idx] = team.clone();
                    Ok(team)
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

    /// Remove a team. No cascade to users or projects referencing it.
    /// Persists on both paths.
    pub async fn delete_team(&self, id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.loading = true;
        state.error = None;

        let result = match state.teams.iter().position(|t| t.id == id) {
            None => Err(AppError::NotFound("Team not found".to_string())),
            Some(idx) => {
                state.teams.remove(idx);
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
