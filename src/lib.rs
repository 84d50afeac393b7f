//! Kanban Board Frontend
//!
//! Client-side workspace for a kanban service: boards, their projects
//! (columns) and tasks, with drag-and-drop reordering and a view filter.

pub mod app;
pub mod commands;
pub mod components;
pub mod config;
pub mod dnd;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod reorder;
pub mod store;

#[cfg(test)]
mod mock_api;

pub use app::App;
pub use config::ApiConfig;
pub use error::{ApiError, StoreError};
pub use store::{provide_workspace_store, use_workspace_store, WorkspaceStore};
