//! Assignee Lookup
//!
//! User search feeds the assignee picker. Assigning re-reads the user first
//! so a stale pick fails before the task is touched.

use leptos::prelude::*;

use super::{TaskDraft, WorkspaceStateStoreFields, WorkspaceStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{Task, User};
use crate::reorder::find_task;

impl WorkspaceStore {
    /// Users whose name matches `query`. A blank query makes no request.
    pub async fn search_users(&self, query: &str) -> StoreResult<Vec<User>> {
        self.require_user()?;
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.api.search_users(query).await?)
    }

    /// Set or clear the assignee of a task, keeping its other fields
    pub async fn assign_task(&self, task_id: &str, assignee_id: Option<&str>) -> StoreResult<Task> {
        self.require_user()?;
        let mut draft = self
            .state
            .projects()
            .with_untracked(|projects| find_task(projects, task_id).map(TaskDraft::from_task))
            .ok_or(StoreError::TaskNotFound)?;

        draft.assignee_id = match assignee_id {
            Some(user_id) => {
                let user = self.api.get_user(user_id).await?;
                log::debug!("[STORE] Assigning task {} to {}", task_id, user.name);
                Some(user.id)
            }
            None => None,
        };
        self.update_task(task_id, draft, None).await
    }
}
