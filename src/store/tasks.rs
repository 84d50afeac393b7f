//! Task Operations
//!
//! Create/update/delete go to the server first and are then spliced into the
//! owning project. Reordering inside a project is local only. Moving across
//! projects is two-phase: the task moves locally, the server is told, and the
//! local move is either reconciled with the server's copy or undone.

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use super::{WorkspaceStateStoreFields, WorkspaceStore};
use crate::commands::{MoveTaskArgs, NewTask, TaskPatch};
use crate::error::{StoreError, StoreResult};
use crate::models::{Project, Status, Task};
use crate::reorder::{
    detach_task, insert_at, insert_by_rank, locate_task, move_within_project, project_index,
    renumber,
};

/// Editable task fields
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub status: Status,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee_id: Option<String>,
    pub order_in_project: Option<i32>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, status: Status) -> Self {
        Self {
            title: title.into(),
            status,
            description: None,
            due_date: None,
            assignee_id: None,
            order_in_project: None,
        }
    }

    /// Draft pre-filled from an existing task, for edit forms
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            status: task.status,
            description: task.description.clone(),
            due_date: task.due_date,
            assignee_id: task.assignee.as_ref().map(|a| a.id.clone()),
            order_in_project: None,
        }
    }
}

/// What a cross-project move changed locally, so it can be undone
struct PendingMove {
    original: Task,
    origin_project_id: String,
    origin_index: usize,
    origin_before: Vec<Task>,
    origin_after: Vec<Task>,
    target_project_id: String,
    target_before: Vec<Task>,
    target_after: Vec<Task>,
    placed_at: usize,
}

impl WorkspaceStore {
    pub async fn add_task(&self, project_id: &str, draft: TaskDraft) -> StoreResult<Task> {
        let user_id = self.require_user()?;
        let board_id = self.require_board()?;
        if !self.has_project(project_id) {
            return Err(StoreError::ProjectNotFound);
        }

        let args = NewTask {
            title: draft.title,
            status: draft.status,
            description: draft.description,
            due_date: draft.due_date,
            board_id,
            project_id: project_id.to_string(),
            assignee_id: draft.assignee_id,
            creator_id: user_id,
            order_in_project: draft.order_in_project,
        };
        let task = self.api.create_task(&args).await?;

        let projects_field = self.state.projects();
        let mut projects = projects_field.write();
        match project_index(&projects, &task.project_id) {
            Some(pi) => {
                insert_by_rank(&mut projects[pi].tasks, task.clone());
            }
            None => log::warn!("[STORE] Created task {} in project {} which is not loaded", task.id, task.project_id),
        }
        Ok(task)
    }

    /// Full update. `new_project_id` re-parents the task when it differs from
    /// the current project.
    pub async fn update_task(
        &self,
        task_id: &str,
        draft: TaskDraft,
        new_project_id: Option<String>,
    ) -> StoreResult<Task> {
        let user_id = self.require_user()?;
        let current_project = self
            .state
            .projects()
            .with_untracked(|projects| {
                locate_task(projects, task_id).map(|(pi, _)| projects[pi].id.clone())
            })
            .ok_or(StoreError::TaskNotFound)?;
        let new_project_id = new_project_id.filter(|pid| *pid != current_project);
        if let Some(pid) = &new_project_id {
            if !self.has_project(pid) {
                return Err(StoreError::ProjectNotFound);
            }
        }

        let reorders = draft.order_in_project.is_some();
        let patch = TaskPatch {
            title: draft.title,
            status: draft.status,
            description: draft.description,
            due_date: draft.due_date,
            assignee_id: draft.assignee_id,
            project_id: new_project_id,
            order_in_project: draft.order_in_project,
            last_modifier_id: user_id,
        };
        let updated = self.api.update_task(task_id, &patch).await?;

        let projects_field = self.state.projects();
        let mut projects = projects_field.write();
        place_updated(&mut projects, task_id, updated.clone(), reorders);
        Ok(updated)
    }

    pub async fn remove_task(&self, task_id: &str) -> StoreResult<()> {
        let known = self
            .state
            .projects()
            .with_untracked(|projects| locate_task(projects, task_id).is_some());
        if !known {
            return Err(StoreError::TaskNotFound);
        }

        self.api.delete_task(task_id).await?;
        detach_task(&mut self.state.projects().write(), task_id);
        Ok(())
    }

    /// Same-project reorder: `active_id` takes the slot of `over_id`.
    /// Local only; returns false when the tasks are not in the same project.
    pub fn reorder_task(&self, active_id: &str, over_id: &str) -> bool {
        if active_id == over_id {
            return true;
        }
        let projects_field = self.state.projects();
        let mut projects = projects_field.write();
        move_within_project(&mut projects, active_id, over_id)
    }

    /// Drag entry point.
    ///
    /// Same project: the local order is already authoritative, nothing to do.
    /// Other project: re-read the task from the server, move it locally to
    /// `index` (end when None) of the target, then commit. If the commit
    /// fails the local move is undone before the error is returned.
    pub async fn drag_task_on_project(
        &self,
        task_id: &str,
        target_project_id: &str,
        index: Option<usize>,
    ) -> StoreResult<()> {
        let origin_project_id = self
            .state
            .projects()
            .with_untracked(|projects| {
                locate_task(projects, task_id).map(|(pi, _)| projects[pi].id.clone())
            })
            .ok_or(StoreError::TaskNotFound)?;
        if origin_project_id == target_project_id {
            log::debug!("[STORE] Task {} reordered within {}, nothing to commit", task_id, target_project_id);
            return Ok(());
        }
        if !self.has_project(target_project_id) {
            return Err(StoreError::ProjectNotFound);
        }
        let user_id = self.require_user()?;

        let fresh = self
            .api
            .get_task(task_id)
            .await?
            .ok_or(StoreError::TaskNotFound)?;

        // Phase 1: local, unconfirmed
        let pending = {
            let projects_field = self.state.projects();
            let mut projects = projects_field.write();
            apply_local_move(&mut projects, fresh, target_project_id, index)?
        };

        // Phase 2: commit
        let args = MoveTaskArgs {
            project_id: target_project_id.to_string(),
            order_in_project: pending.placed_at as i32,
            last_modifier_id: user_id,
        };
        match self.api.move_task(task_id, &args).await {
            Ok(confirmed) => {
                log::debug!("[STORE] Moved task {} to {}", task_id, target_project_id);
                let projects_field = self.state.projects();
                let mut projects = projects_field.write();
                reconcile_move(&mut projects, confirmed);
                Ok(())
            }
            Err(err) => {
                log::warn!("[STORE] Move of task {} to {} rejected: {}", task_id, target_project_id, err);
                let projects_field = self.state.projects();
                let mut projects = projects_field.write();
                undo_move(&mut projects, pending);
                Err(err.into())
            }
        }
    }
}

/// Put a server-confirmed task where it belongs. Stays in its slot unless it
/// changed project or was explicitly re-ranked.
fn place_updated(projects: &mut Vec<Project>, task_id: &str, updated: Task, reorders: bool) {
    if let Some((pi, ti)) = locate_task(projects, task_id) {
        if !reorders && projects[pi].id == updated.project_id {
            let order = projects[pi].tasks[ti].order_in_project;
            projects[pi].tasks[ti] = Task {
                order_in_project: order,
                ..updated
            };
            return;
        }
        detach_task(projects, task_id);
    }
    match project_index(projects, &updated.project_id) {
        Some(pi) => {
            insert_by_rank(&mut projects[pi].tasks, updated);
        }
        None => log::info!("[STORE] Task {} left the open board", updated.id),
    }
}

fn apply_local_move(
    projects: &mut Vec<Project>,
    fresh: Task,
    target_project_id: &str,
    index: Option<usize>,
) -> StoreResult<PendingMove> {
    // Re-check: the task or target may have vanished while get_task was in flight
    let (origin_pi, origin_index) =
        locate_task(projects, &fresh.id).ok_or(StoreError::TaskNotFound)?;
    let target_pi = project_index(projects, target_project_id).ok_or(StoreError::ProjectNotFound)?;

    let origin_before = projects[origin_pi].tasks.clone();
    let target_before = projects[target_pi].tasks.clone();

    let original = projects[origin_pi].tasks.remove(origin_index);
    renumber(&mut projects[origin_pi].tasks);

    let moving = Task {
        project_id: target_project_id.to_string(),
        ..fresh
    };
    let placed_at = insert_at(&mut projects[target_pi].tasks, index, moving);

    Ok(PendingMove {
        original,
        origin_project_id: projects[origin_pi].id.clone(),
        origin_index,
        origin_before,
        origin_after: projects[origin_pi].tasks.clone(),
        target_project_id: target_project_id.to_string(),
        target_before,
        target_after: projects[target_pi].tasks.clone(),
        placed_at,
    })
}

/// Adopt the server's copy but keep the slot chosen locally
fn reconcile_move(projects: &mut Vec<Project>, confirmed: Task) {
    match locate_task(projects, &confirmed.id) {
        Some((pi, ti)) if projects[pi].id == confirmed.project_id => {
            let order = projects[pi].tasks[ti].order_in_project;
            projects[pi].tasks[ti] = Task {
                order_in_project: order,
                ..confirmed
            };
        }
        _ => {
            // Server put it somewhere else (or it vanished locally): follow the server
            detach_task(projects, &confirmed.id);
            if let Some(pi) = project_index(projects, &confirmed.project_id) {
                insert_by_rank(&mut projects[pi].tasks, confirmed);
            }
        }
    }
}

/// Undo one cross-project move. If neither column changed since phase 1 the
/// exact prior lists are restored; otherwise only the moved task is put back.
fn undo_move(projects: &mut Vec<Project>, pending: PendingMove) {
    let origin_pi = project_index(projects, &pending.origin_project_id);
    let target_pi = project_index(projects, &pending.target_project_id);

    if let (Some(opi), Some(tpi)) = (origin_pi, target_pi) {
        if projects[opi].tasks == pending.origin_after && projects[tpi].tasks == pending.target_after {
            projects[opi].tasks = pending.origin_before;
            projects[tpi].tasks = pending.target_before;
            return;
        }
    }

    detach_task(projects, &pending.original.id);
    match origin_pi {
        Some(opi) => {
            insert_at(&mut projects[opi].tasks, Some(pending.origin_index), pending.original);
        }
        None => log::warn!("[STORE] Origin project {} is gone, dropping task {}", pending.origin_project_id, pending.original.id),
    }
}
