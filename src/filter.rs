//! Task Filtering
//!
//! Pure derivation of the visible tasks per project. Safe to recompute on
//! every render.

use crate::models::{Filter, Project, Task};

/// Case-insensitive substring match on the title
fn title_matches(task: &Task, needle_lower: &str) -> bool {
    needle_lower.is_empty() || task.title.to_lowercase().contains(needle_lower)
}

/// Status and search predicates are conjunctive; soft-deleted tasks never show.
pub fn is_visible(task: &Task, filter: &Filter) -> bool {
    if task.deleted {
        return false;
    }
    if let Some(status) = filter.status {
        if task.status != status {
            return false;
        }
    }
    title_matches(task, &filter.search.to_lowercase())
}

/// Visible tasks of one project, in render order
pub fn visible_tasks(project: &Project, filter: &Filter) -> Vec<Task> {
    project
        .tasks
        .iter()
        .filter(|t| is_visible(t, filter))
        .cloned()
        .collect()
}

/// A project with its filtered task slice
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView {
    pub project_id: String,
    pub title: String,
    pub tasks: Vec<Task>,
    /// Count before filtering (soft-deleted excluded)
    pub total: usize,
}

/// Per-project visible task lists. Projects are never hidden, even when empty.
pub fn visible_projects(projects: &[Project], filter: &Filter) -> Vec<ProjectView> {
    projects
        .iter()
        .map(|p| ProjectView {
            project_id: p.id.clone(),
            title: p.title.clone(),
            tasks: visible_tasks(p, filter),
            total: p.tasks.iter().filter(|t| !t.deleted).count(),
        })
        .collect()
}
