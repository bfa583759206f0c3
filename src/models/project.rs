//! Project model matching the frontend Project interface.

use serde::{Deserialize, Serialize};

/// Project lifecycle status. New projects always start in `planning`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    OnHold,
}

/// Priority level shared by projects and tasks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A project owned by a team.
///
/// The description is rich-text HTML, opaque to the store. The team
/// reference is not existence-checked at write time; readers resolve
/// dangling references defensively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub team_id: i64,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub start_date: String,
    pub end_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new project. Status is not accepted here:
/// creation always yields `planning`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub team_id: i64,
    pub priority: Priority,
    pub start_date: String,
    pub end_date: String,
}

/// Request body for updating an existing project. Unlike creation, the
/// status is caller-supplied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: String,
    pub description: String,
    pub team_id: i64,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub start_date: String,
    pub end_date: String,
}
