//! Board Commands
//!
//! Request bodies for board endpoints.

use serde::Serialize;

// ========================
// Argument Structs
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: String,
}

// ========================
// Routes
// ========================

pub(crate) fn boards_path() -> String {
    "boards".to_string()
}

pub(crate) fn board_path(board_id: &str) -> String {
    format!("boards/{}", super::segment(board_id))
}

pub(crate) fn board_projects_path(board_id: &str) -> String {
    format!("boards/{}/projects", super::segment(board_id))
}
