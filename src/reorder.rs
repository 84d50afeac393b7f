//! Task Ordering Utilities
//!
//! Pure list operations used by the store. A project's `tasks` vec is the
//! render order; `order_in_project` mirrors the index after every local change.

use crate::models::{Project, Task};

/// Remove the element at `from` and insert it at `to` (array-move semantics).
/// Returns false (and leaves `list` untouched) when either index is out of range.
pub fn array_move<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= list.len() || to >= list.len() {
        return false;
    }
    if from != to {
        let item = list.remove(from);
        list.insert(to, item);
    }
    true
}

/// Reindex tasks to be sequential (0, 1, 2, ...)
pub fn renumber(tasks: &mut [Task]) {
    for (pos, task) in tasks.iter_mut().enumerate() {
        task.order_in_project = pos as i32;
    }
}

/// Sort a freshly fetched task list by rank; ties keep server order
pub fn sort_by_rank(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| t.order_in_project);
}

/// Insert after every task with an equal or lower rank. Returns the index used.
pub fn insert_by_rank(tasks: &mut Vec<Task>, task: Task) -> usize {
    let idx = tasks
        .iter()
        .position(|t| t.order_in_project > task.order_in_project)
        .unwrap_or(tasks.len());
    tasks.insert(idx, task);
    idx
}

/// Insert at `index` (clamped to the end) and renumber. Returns the index used.
pub fn insert_at(tasks: &mut Vec<Task>, index: Option<usize>, task: Task) -> usize {
    let idx = index.unwrap_or(tasks.len()).min(tasks.len());
    tasks.insert(idx, task);
    renumber(tasks);
    idx
}

/// `(project index, task index)` of a task across all projects
pub fn locate_task(projects: &[Project], task_id: &str) -> Option<(usize, usize)> {
    projects.iter().enumerate().find_map(|(pi, p)| {
        p.tasks
            .iter()
            .position(|t| t.id == task_id)
            .map(|ti| (pi, ti))
    })
}

pub fn find_task<'a>(projects: &'a [Project], task_id: &str) -> Option<&'a Task> {
    locate_task(projects, task_id).map(|(pi, ti)| &projects[pi].tasks[ti])
}

pub fn project_index(projects: &[Project], project_id: &str) -> Option<usize> {
    projects.iter().position(|p| p.id == project_id)
}

/// Move `active_id` onto the slot held by `over_id` inside one project.
/// Returns false when the two tasks are not siblings or either is missing.
pub fn move_within_project(projects: &mut [Project], active_id: &str, over_id: &str) -> bool {
    let Some((pi, from)) = locate_task(projects, active_id) else { return false };
    let Some(to) = projects[pi].tasks.iter().position(|t| t.id == over_id) else { return false };
    let tasks = &mut projects[pi].tasks;
    if from == to {
        return true;
    }
    array_move(tasks, from, to);
    renumber(tasks);
    true
}

/// Pull a task out of whatever project holds it. Returns `(project index, task index, task)`.
pub fn detach_task(projects: &mut [Project], task_id: &str) -> Option<(usize, usize, Task)> {
    let (pi, ti) = locate_task(projects, task_id)?;
    let task = projects[pi].tasks.remove(ti);
    renumber(&mut projects[pi].tasks);
    Some((pi, ti, task))
}
