//! Project Commands
//!
//! Request bodies for project endpoints.

use serde::Serialize;

// ========================
// Argument Structs
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub board_id: String,
    pub owner_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub title: String,
    pub description: Option<String>,
    pub last_modifier_id: String,
}

// ========================
// Routes
// ========================

pub(crate) fn projects_path() -> String {
    "projects".to_string()
}

pub(crate) fn project_path(project_id: &str) -> String {
    format!("projects/{}", super::segment(project_id))
}

pub(crate) fn project_tasks_path(project_id: &str) -> String {
    format!("projects/{}/tasks", super::segment(project_id))
}
