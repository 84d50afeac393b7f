//! Remote API Client
//!
//! REST bindings to the board/project/task/user endpoints, organized by domain.
//! The store only sees the `RemoteApi` trait; `HttpApi` is the production
//! implementation.

mod board;
mod http;
mod project;
mod retry;
mod task;
mod user;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};

use crate::error::ApiResult;
use crate::models::{Board, BoardList, Project, Task, User};

// Re-export all public items
pub use board::*;
pub use http::HttpApi;
pub use project::*;
pub use retry::retry_read;
pub use task::*;

/// Characters escaped inside a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped inside a query value
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Remote operations the workspace store depends on.
///
/// Futures are `?Send`: in the browser everything runs on the UI thread.
#[async_trait(?Send)]
pub trait RemoteApi: Send + Sync {
    async fn current_user(&self) -> ApiResult<User>;

    async fn list_boards(&self) -> ApiResult<BoardList>;

    async fn create_board(&self, args: &NewBoard) -> ApiResult<Board>;

    async fn delete_board(&self, board_id: &str) -> ApiResult<()>;

    async fn get_projects(&self, board_id: &str) -> ApiResult<Vec<Project>>;

    async fn create_project(&self, args: &NewProject) -> ApiResult<Project>;

    async fn update_project(&self, project_id: &str, args: &ProjectPatch) -> ApiResult<Project>;

    async fn delete_project(&self, project_id: &str) -> ApiResult<()>;

    async fn get_tasks(&self, project_id: &str) -> ApiResult<Vec<Task>>;

    /// `Ok(None)` when the server no longer has the task
    async fn get_task(&self, task_id: &str) -> ApiResult<Option<Task>>;

    async fn create_task(&self, args: &NewTask) -> ApiResult<Task>;

    async fn update_task(&self, task_id: &str, args: &TaskPatch) -> ApiResult<Task>;

    async fn move_task(&self, task_id: &str, args: &MoveTaskArgs) -> ApiResult<Task>;

    async fn delete_task(&self, task_id: &str) -> ApiResult<()>;

    async fn search_users(&self, query: &str) -> ApiResult<Vec<User>>;

    async fn get_user(&self, user_id: &str) -> ApiResult<User>;
}
