//! Project Operations
//!
//! No optimistic inserts: a project only appears once the server has assigned its id.

use leptos::prelude::*;

use super::{WorkspaceStateStoreFields, WorkspaceStore};
use crate::commands::{NewProject, ProjectPatch};
use crate::error::{StoreError, StoreResult};
use crate::models::Project;

impl WorkspaceStore {
    pub async fn add_project(&self, title: &str, description: Option<String>) -> StoreResult<Project> {
        let user_id = self.require_user()?;
        let board_id = self.require_board()?;

        let args = NewProject {
            title: title.to_string(),
            description,
            board_id,
            owner_id: user_id,
        };
        let mut project = self.api.create_project(&args).await?;
        // A new project has no tasks yet; never trust a stray list from the response
        project.tasks.clear();

        self.state.projects().write().push(project.clone());
        Ok(project)
    }

    /// Local tasks are kept; only the project's own fields are replaced
    pub async fn update_project(
        &self,
        project_id: &str,
        title: &str,
        description: Option<String>,
    ) -> StoreResult<Project> {
        let user_id = self.require_user()?;
        if !self.has_project(project_id) {
            return Err(StoreError::ProjectNotFound);
        }

        let args = ProjectPatch {
            title: title.to_string(),
            description,
            last_modifier_id: user_id,
        };
        let mut updated = self.api.update_project(project_id, &args).await?;

        let projects_field = self.state.projects();
        let mut projects = projects_field.write();
        if let Some(existing) = projects.iter_mut().find(|p| p.id == project_id) {
            updated.tasks = std::mem::take(&mut existing.tasks);
            *existing = updated.clone();
        }
        Ok(updated)
    }

    pub async fn remove_project(&self, project_id: &str) -> StoreResult<()> {
        self.require_user()?;
        if !self.has_project(project_id) {
            return Err(StoreError::ProjectNotFound);
        }

        self.api.delete_project(project_id).await?;
        self.state.projects().write().retain(|p| p.id != project_id);
        Ok(())
    }
}
