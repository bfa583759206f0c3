//! Team API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, success_with, ApiResult};
use crate::models::{CreateTeamRequest, Team, UpdateTeamRequest};
use crate::AppState;

/// GET /api/teams - List all teams.
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Vec<Team>> {
    success(state.teams.list().await)
}

/// POST /api/teams - Create a new team.
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamRequest>,
) -> ApiResult<Team> {
    let team = state.teams.create_team(request).await?;
    success_with(team, "Team created successfully")
}

/// PUT /api/teams/:id - Update a team.
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTeamRequest>,
) -> ApiResult<Team> {
    let team = state.teams.update_team(id, request).await?;
    success_with(team, "Team updated successfully")
}

/// DELETE /api/teams/:id - Delete a team.
pub async fn delete_team(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.teams.delete_team(id).await?;
    success_with((), "Team deleted successfully")
}
