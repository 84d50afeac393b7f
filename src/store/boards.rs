//! Board Operations
//!
//! Board lists, board selection and the full project/task load for the
//! current board.

use std::collections::HashMap;
use std::sync::atomic::Ordering;

use futures::future::try_join_all;
use leptos::prelude::*;

use super::{WorkspaceStateStoreFields, WorkspaceStore};
use crate::commands::NewBoard;
use crate::error::{ApiResult, StoreResult};
use crate::models::{Board, Project, Task};
use crate::reorder::sort_by_rank;

impl WorkspaceStore {
    /// Resolve the signed-in user. Stays signed out if the lookup fails.
    pub async fn load_session(&self) -> Option<String> {
        match self.api.current_user().await {
            Ok(user) => {
                log::info!("[STORE] Signed in as {}", user.name);
                self.set_user_id(Some(user.id.clone()));
                Some(user.id)
            }
            Err(err) => {
                log::warn!("[STORE] No session: {}", err);
                self.set_user_id(None);
                None
            }
        }
    }

    /// Load my/team boards. A failed read leaves both lists empty.
    pub async fn fetch_boards(&self) {
        self.state.is_loading_boards().set(true);
        let user_id = self.user_id();

        match self.api.list_boards().await {
            Ok(list) => {
                let (mine, team) = list.split(user_id.as_deref());
                log::debug!("[STORE] Loaded {} own and {} team boards", mine.len(), team.len());
                self.state.my_boards().set(mine);
                self.state.team_boards().set(team);
            }
            Err(err) => {
                log::error!("[STORE] Failed to load boards: {}", err);
                self.state.my_boards().set(Vec::new());
                self.state.team_boards().set(Vec::new());
            }
        }

        self.state.is_loading_boards().set(false);
    }

    pub async fn add_board(&self, title: &str, description: Option<String>) -> StoreResult<Board> {
        let user_id = self.require_user()?;
        let args = NewBoard {
            title: title.to_string(),
            description,
            owner_id: user_id,
        };
        let board = self.api.create_board(&args).await?;
        self.state.my_boards().write().push(board.clone());
        Ok(board)
    }

    /// Removing the open board also closes it
    pub async fn remove_board(&self, board_id: &str) -> StoreResult<()> {
        self.require_user()?;
        self.api.delete_board(board_id).await?;

        self.state.my_boards().write().retain(|b| b.id != board_id);
        self.state.team_boards().write().retain(|b| b.id != board_id);
        if self.current_board_id().as_deref() == Some(board_id) {
            self.state.current_board_id().set(None);
            self.state.projects().set(Vec::new());
        }
        Ok(())
    }

    /// Open a board and load its projects
    pub async fn select_board(&self, board_id: &str) {
        self.set_current_board_id(Some(board_id.to_string()));
        self.fetch_projects(board_id).await;
    }

    /// Load all projects of `board_id` and each project's tasks.
    ///
    /// Never fails: on any error `projects` becomes empty. The result (or the
    /// error reset) is applied only if the current board is still the one that
    /// was current when the load started, so a reset or a board switch in the
    /// meantime wins. `is_loading_projects` stays up until the last
    /// overlapping load finishes.
    pub async fn fetch_projects(&self, board_id: &str) {
        let started_for = self.current_board_id();
        self.project_loads.fetch_add(1, Ordering::SeqCst);
        self.state.is_loading_projects().set(true);

        let result = self.load_projects(board_id).await;
        let targets_board = started_for.as_deref().map_or(true, |current| current == board_id);
        let still_current = targets_board && self.current_board_id() == started_for;

        match result {
            Ok(projects) if still_current => {
                log::debug!("[STORE] Loaded {} projects for board {}", projects.len(), board_id);
                self.state.projects().set(projects);
            }
            Ok(_) => {
                log::debug!("[STORE] Dropping projects of board {}, no longer current", board_id);
            }
            Err(err) => {
                log::error!("[STORE] Failed to load projects for board {}: {}", board_id, err);
                if still_current {
                    self.state.projects().set(Vec::new());
                }
            }
        }

        if self.project_loads.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.state.is_loading_projects().set(false);
        }
    }

    async fn load_projects(&self, board_id: &str) -> ApiResult<Vec<Project>> {
        let mut projects = self.api.get_projects(board_id).await?;

        // Task lists load in parallel; results are matched back by project id.
        let lists = try_join_all(projects.iter().map(|p| async move {
            self.api
                .get_tasks(&p.id)
                .await
                .map(|tasks| (p.id.clone(), tasks))
        }))
        .await?;
        let mut by_project: HashMap<String, Vec<Task>> = lists.into_iter().collect();

        for project in projects.iter_mut() {
            let mut tasks = by_project.remove(&project.id).unwrap_or_default();
            tasks.retain(|t| {
                let owned = t.project_id == project.id;
                if !owned {
                    log::warn!("[STORE] Task {} listed under project {} but belongs to {}", t.id, project.id, t.project_id);
                }
                owned
            });
            sort_by_rank(&mut tasks);
            project.tasks = tasks;
        }
        Ok(projects)
    }
}
