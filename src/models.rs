//! Frontend Models
//!
//! Data structures matching the REST entities. User references inside
//! tasks/projects/boards are value snapshots, not live links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Denormalized `{id, name}` user snapshot embedded in other entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::InProgress => "IN_PROGRESS",
            Status::Done => "DONE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TODO" => Some(Status::Todo),
            "IN_PROGRESS" => Some(Status::InProgress),
            "DONE" => Some(Status::Done),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Todo => "To do",
            Status::InProgress => "In progress",
            Status::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub board_id: String,
    pub project_id: String,
    #[serde(default)]
    pub assignee: Option<UserRef>,
    pub creator: UserRef,
    pub last_modifier: UserRef,
    pub order_in_project: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Server-side soft delete marker
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub board_id: String,
    pub owner: UserRef,
    #[serde(default)]
    pub members: Vec<UserRef>,
    /// Owning collection, ordered by `order_in_project`
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner: UserRef,
    #[serde(default)]
    pub members: Vec<UserRef>,
    #[serde(default)]
    pub projects: Vec<String>,
}

/// Board list response: either pre-split by the server or flat
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BoardList {
    #[serde(rename_all = "camelCase")]
    Split {
        my_boards: Vec<Board>,
        team_boards: Vec<Board>,
    },
    Flat(Vec<Board>),
}

impl BoardList {
    /// Returns `(my_boards, team_boards)`; flat lists are split by `owner.id == user_id`
    pub fn split(self, user_id: Option<&str>) -> (Vec<Board>, Vec<Board>) {
        match self {
            BoardList::Split {
                my_boards,
                team_boards,
            } => (my_boards, team_boards),
            BoardList::Flat(boards) => boards
                .into_iter()
                .partition(|b| Some(b.owner.id.as_str()) == user_id),
        }
    }
}

/// Ephemeral view filter, never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// None = no status filter
    pub status: Option<Status>,
    pub search: String,
}
