//! Task Commands
//!
//! Request bodies for task endpoints. Moving has its own endpoint so the
//! server can re-rank both projects in one transaction.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Status;

// ========================
// Argument Structs
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub board_id: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    pub creator_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_in_project: Option<i32>,
}

/// Full update: every editable field is sent, plus who made the change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: String,
    pub status: Status,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_in_project: Option<i32>,
    pub last_modifier_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskArgs {
    pub project_id: String,
    pub order_in_project: i32,
    pub last_modifier_id: String,
}

// ========================
// Routes
// ========================

pub(crate) fn tasks_path() -> String {
    "tasks".to_string()
}

pub(crate) fn task_path(task_id: &str) -> String {
    format!("tasks/{}", super::segment(task_id))
}

pub(crate) fn task_move_path(task_id: &str) -> String {
    format!("tasks/{}/move", super::segment(task_id))
}
