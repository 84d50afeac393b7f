//! Workspace Store
//!
//! Holds the currently open board (its projects and their tasks) plus the
//! board lists and the view filter. Uses Leptos reactive_stores for
//! fine-grained reactivity.
//!
//! Writes go remote-first for creates and deletes; the local copy is only
//! touched once the server confirmed. Cross-project drags are the exception:
//! they move locally first and undo themselves if the server rejects the move.

mod boards;
mod projects;
mod tasks;
mod users;


use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands::RemoteApi;
use crate::error::{StoreError, StoreResult};
use crate::filter::{self, ProjectView};
use crate::models::{Board, Filter, Project};

pub use tasks::TaskDraft;

/// Workspace state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct WorkspaceState {
    /// Signed-in user, None until the session is known
    pub user_id: Option<String>,
    pub my_boards: Vec<Board>,
    pub team_boards: Vec<Board>,
    /// Gates which board's projects are live
    pub current_board_id: Option<String>,
    /// Projects of the current board, each owning its ordered tasks
    pub projects: Vec<Project>,
    pub filter: Filter,
    pub is_loading_boards: bool,
    pub is_loading_projects: bool,
}

/// Handle to the workspace state and the remote API it talks to.
///
/// Cheap to clone. Construct one per application root and provide it via context.
#[derive(Clone)]
pub struct WorkspaceStore {
    state: Store<WorkspaceState>,
    api: Arc<dyn RemoteApi>,
    /// Project loads in flight; `is_loading_projects` drops only when this reaches zero
    project_loads: Arc<AtomicUsize>,
}

/// Create the store and provide it to all children
pub fn provide_workspace_store(api: Arc<dyn RemoteApi>) -> WorkspaceStore {
    let store = WorkspaceStore::new(api);
    provide_context(store.clone());
    store
}

/// Get the workspace store from context
pub fn use_workspace_store() -> WorkspaceStore {
    expect_context::<WorkspaceStore>()
}

impl WorkspaceStore {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self {
            state: Store::new(WorkspaceState::default()),
            api,
            project_loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reactive state for views
    pub fn state(&self) -> Store<WorkspaceState> {
        self.state
    }

    // ========================
    // Untracked Reads
    // ========================

    pub fn projects(&self) -> Vec<Project> {
        self.state.projects().get_untracked()
    }

    pub fn current_board_id(&self) -> Option<String> {
        self.state.current_board_id().get_untracked()
    }

    pub fn user_id(&self) -> Option<String> {
        self.state.user_id().get_untracked()
    }

    pub fn filter(&self) -> Filter {
        self.state.filter().get_untracked()
    }

    pub fn my_boards(&self) -> Vec<Board> {
        self.state.my_boards().get_untracked()
    }

    pub fn team_boards(&self) -> Vec<Board> {
        self.state.team_boards().get_untracked()
    }

    pub fn is_loading_projects(&self) -> bool {
        self.state.is_loading_projects().get_untracked()
    }

    pub fn is_loading_boards(&self) -> bool {
        self.state.is_loading_boards().get_untracked()
    }

    /// Reactive: visible tasks per project under the current filter
    pub fn visible_projects(&self) -> Vec<ProjectView> {
        let filter = self.state.filter().get();
        self.state
            .projects()
            .with(|projects| filter::visible_projects(projects, &filter))
    }

    // ========================
    // Local Setters (no network)
    // ========================

    pub fn set_filter(&self, filter: Filter) {
        self.state.filter().set(filter);
    }

    pub fn set_projects(&self, projects: Vec<Project>) {
        self.state.projects().set(projects);
    }

    pub fn set_user_id(&self, user_id: Option<String>) {
        self.state.user_id().set(user_id);
    }

    pub fn set_my_boards(&self, boards: Vec<Board>) {
        self.state.my_boards().set(boards);
    }

    pub fn set_team_boards(&self, boards: Vec<Board>) {
        self.state.team_boards().set(boards);
    }

    /// Switching to a different board drops the previous board's projects at once
    pub fn set_current_board_id(&self, board_id: Option<String>) {
        if self.current_board_id() == board_id {
            return;
        }
        self.state.current_board_id().set(board_id);
        self.state.projects().set(Vec::new());
    }

    /// Leave the board list: boards, current board and projects go together
    pub fn reset_in_boards(&self) {
        self.state.my_boards().set(Vec::new());
        self.state.team_boards().set(Vec::new());
        self.state.current_board_id().set(None);
        self.state.projects().set(Vec::new());
    }

    /// Sign-out: back to a fresh state
    pub fn reset(&self) {
        *self.state.write() = WorkspaceState::default();
    }

    // ========================
    // Preconditions
    // ========================

    fn require_user(&self) -> StoreResult<String> {
        self.user_id().ok_or(StoreError::Unauthenticated)
    }

    fn require_board(&self) -> StoreResult<String> {
        self.current_board_id().ok_or(StoreError::NoBoardSelected)
    }

    fn has_project(&self, project_id: &str) -> bool {
        self.state
            .projects()
            .with_untracked(|projects| projects.iter().any(|p| p.id == project_id))
    }
}
