//! In-memory `RemoteApi` for tests.
//!
//! Keeps a server-side copy of projects/tasks, records every call, and can be
//! told to fail specific endpoints.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::commands::{MoveTaskArgs, NewBoard, NewProject, NewTask, ProjectPatch, RemoteApi, TaskPatch};
use crate::error::{ApiError, ApiResult};
use crate::models::{Board, BoardList, Project, Task, User, UserRef};

#[derive(Default)]
pub struct MockState {
    pub boards: Vec<Board>,
    pub projects: Vec<Project>,
    pub users: Vec<User>,
    pub calls: Vec<String>,
    pub fail_list_boards: bool,
    pub fail_get_projects: bool,
    pub fail_get_tasks: bool,
    pub fail_moves: bool,
    pub fail_writes: bool,
    /// Project ids whose next task fetch yields this many times before
    /// answering. Each entry is used once.
    pub task_latency: Vec<(String, usize)>,
    /// Yields before `move_task` answers
    pub move_latency: usize,
    next_id: u32,
}

#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
}

fn server_error() -> ApiError {
    ApiError::Status {
        code: 500,
        message: "boom".to_string(),
    }
}

fn user_ref(id: &str) -> UserRef {
    UserRef {
        id: id.to_string(),
        name: format!("User {}", id),
    }
}

impl MockApi {
    pub fn with_projects(projects: Vec<Project>) -> Self {
        let api = MockApi::default();
        api.state().projects = projects;
        api
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn fail_moves(&self, fail: bool) {
        self.state().fail_moves = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    fn record(&self, call: String) -> MutexGuard<'_, MockState> {
        let mut state = self.state();
        state.calls.push(call);
        state
    }

    fn write_guard(&self, call: String) -> ApiResult<MutexGuard<'_, MockState>> {
        let state = self.record(call);
        if state.fail_writes {
            return Err(server_error());
        }
        Ok(state)
    }
}

impl MockState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-new-{}", prefix, self.next_id)
    }

    fn find_task(&self, task_id: &str) -> Option<Task> {
        self.projects
            .iter()
            .flat_map(|p| p.tasks.iter())
            .find(|t| t.id == task_id)
            .cloned()
    }

    fn take_task(&mut self, task_id: &str) -> Option<Task> {
        for p in self.projects.iter_mut() {
            if let Some(idx) = p.tasks.iter().position(|t| t.id == task_id) {
                return Some(p.tasks.remove(idx));
            }
        }
        None
    }

    fn put_task(&mut self, task: Task) {
        if let Some(p) = self.projects.iter_mut().find(|p| p.id == task.project_id) {
            p.tasks.push(task);
        }
    }
}

#[async_trait(?Send)]
impl RemoteApi for MockApi {
    async fn current_user(&self) -> ApiResult<User> {
        let state = self.record("current_user".into());
        state.users.first().cloned().ok_or(ApiError::NotFound("me".into()))
    }

    async fn list_boards(&self) -> ApiResult<BoardList> {
        let state = self.record("list_boards".into());
        if state.fail_list_boards {
            return Err(server_error());
        }
        Ok(BoardList::Flat(state.boards.clone()))
    }

    async fn create_board(&self, args: &NewBoard) -> ApiResult<Board> {
        let mut state = self.write_guard("create_board".into())?;
        let board = Board {
            id: state.next_id("b"),
            title: args.title.clone(),
            description: args.description.clone(),
            owner: user_ref(&args.owner_id),
            members: vec![],
            projects: vec![],
        };
        state.boards.push(board.clone());
        Ok(board)
    }

    async fn delete_board(&self, board_id: &str) -> ApiResult<()> {
        let mut state = self.write_guard(format!("delete_board {}", board_id))?;
        state.boards.retain(|b| b.id != board_id);
        Ok(())
    }

    async fn get_projects(&self, board_id: &str) -> ApiResult<Vec<Project>> {
        let state = self.record(format!("get_projects {}", board_id));
        if state.fail_get_projects {
            return Err(server_error());
        }
        Ok(state
            .projects
            .iter()
            .filter(|p| p.board_id == board_id)
            .map(|p| Project {
                tasks: vec![],
                ..p.clone()
            })
            .collect())
    }

    async fn create_project(&self, args: &NewProject) -> ApiResult<Project> {
        let mut state = self.write_guard("create_project".into())?;
        let project = Project {
            id: state.next_id("p"),
            title: args.title.clone(),
            description: args.description.clone(),
            board_id: args.board_id.clone(),
            owner: user_ref(&args.owner_id),
            members: vec![],
            tasks: vec![],
        };
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, project_id: &str, args: &ProjectPatch) -> ApiResult<Project> {
        let mut state = self.write_guard(format!("update_project {}", project_id))?;
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or(ApiError::NotFound(project_id.into()))?;
        project.title = args.title.clone();
        project.description = args.description.clone();
        // the endpoint answers without the task list
        Ok(Project {
            tasks: vec![],
            ..project.clone()
        })
    }

    async fn delete_project(&self, project_id: &str) -> ApiResult<()> {
        let mut state = self.write_guard(format!("delete_project {}", project_id))?;
        state.projects.retain(|p| p.id != project_id);
        Ok(())
    }

    async fn get_tasks(&self, project_id: &str) -> ApiResult<Vec<Task>> {
        let (fail, latency) = {
            let mut state = self.record(format!("get_tasks {}", project_id));
            let latency = match state.task_latency.iter().position(|(pid, _)| pid == project_id) {
                Some(idx) => state.task_latency.remove(idx).1,
                None => 0,
            };
            (state.fail_get_tasks, latency)
        };
        for _ in 0..latency {
            tokio::task::yield_now().await;
        }
        if fail {
            return Err(server_error());
        }
        let state = self.state();
        let mut tasks = state
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .map(|p| p.tasks.clone())
            .unwrap_or_default();
        // server answers unsorted
        tasks.reverse();
        Ok(tasks)
    }

    async fn get_task(&self, task_id: &str) -> ApiResult<Option<Task>> {
        let state = self.record(format!("get_task {}", task_id));
        Ok(state.find_task(task_id))
    }

    async fn create_task(&self, args: &NewTask) -> ApiResult<Task> {
        let mut state = self.write_guard("create_task".into())?;
        let order = match args.order_in_project {
            Some(order) => order,
            None => state
                .projects
                .iter()
                .find(|p| p.id == args.project_id)
                .map_or(0, |p| p.tasks.len() as i32),
        };
        let now = Utc::now();
        let task = Task {
            id: state.next_id("t"),
            title: args.title.clone(),
            description: args.description.clone(),
            status: args.status,
            due_date: args.due_date,
            board_id: args.board_id.clone(),
            project_id: args.project_id.clone(),
            assignee: args.assignee_id.as_deref().map(user_ref),
            creator: user_ref(&args.creator_id),
            last_modifier: user_ref(&args.creator_id),
            order_in_project: order,
            created_at: now,
            updated_at: now,
            deleted: false,
        };
        state.put_task(task.clone());
        Ok(task)
    }

    async fn update_task(&self, task_id: &str, args: &TaskPatch) -> ApiResult<Task> {
        let mut state = self.write_guard(format!("update_task {}", task_id))?;
        let mut task = state.take_task(task_id).ok_or(ApiError::NotFound(task_id.into()))?;
        task.title = args.title.clone();
        task.status = args.status;
        task.description = args.description.clone();
        task.due_date = args.due_date;
        task.assignee = args.assignee_id.as_deref().map(user_ref);
        task.last_modifier = user_ref(&args.last_modifier_id);
        if let Some(pid) = &args.project_id {
            task.project_id = pid.clone();
        }
        if let Some(order) = args.order_in_project {
            task.order_in_project = order;
        }
        task.updated_at = Utc::now();
        state.put_task(task.clone());
        Ok(task)
    }

    async fn move_task(&self, task_id: &str, args: &MoveTaskArgs) -> ApiResult<Task> {
        let latency = self
            .record(format!("move_task {} {}", task_id, args.project_id))
            .move_latency;
        for _ in 0..latency {
            tokio::task::yield_now().await;
        }
        let mut state = self.state();
        if state.fail_moves || state.fail_writes {
            return Err(server_error());
        }
        let mut task = state.take_task(task_id).ok_or(ApiError::NotFound(task_id.into()))?;
        task.project_id = args.project_id.clone();
        task.order_in_project = args.order_in_project;
        task.last_modifier = user_ref(&args.last_modifier_id);
        state.put_task(task.clone());
        Ok(task)
    }

    async fn delete_task(&self, task_id: &str) -> ApiResult<()> {
        let mut state = self.write_guard(format!("delete_task {}", task_id))?;
        state.take_task(task_id);
        Ok(())
    }

    async fn search_users(&self, query: &str) -> ApiResult<Vec<User>> {
        let state = self.record(format!("search_users {}", query));
        let needle = query.to_lowercase();
        Ok(state
            .users
            .iter()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_user(&self, user_id: &str) -> ApiResult<User> {
        let state = self.record(format!("get_user {}", user_id));
        state
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or(ApiError::NotFound(user_id.into()))
    }
}
