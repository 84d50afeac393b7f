//! HTTP Transport
//!
//! `RemoteApi` over JSON REST using reqwest. GETs go through the read retry
//! policy; writes are sent exactly once.

use async_trait::async_trait;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::board::{board_path, board_projects_path, boards_path, NewBoard};
use super::project::{project_path, project_tasks_path, projects_path, NewProject, ProjectPatch};
use super::retry::retry_read;
use super::task::{task_move_path, task_path, tasks_path, MoveTaskArgs, NewTask, TaskPatch};
use super::user::{current_user_path, user_path, user_search_path};
use super::RemoteApi;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Board, BoardList, Project, Task, User};

pub struct HttpApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        retry_read(self.config.retry_policy(), || self.get_once(path)).await
    }

    async fn get_once<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.config.url(path);
        log::debug!("[API] GET {}", url);
        let resp = self.client.get(&url).send().await.map_err(transport)?;
        decode(check(resp).await?).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        log::debug!("[API] {} {}", method, url);
        let resp = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode(check(resp).await?).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.config.url(path);
        log::debug!("[API] DELETE {}", url);
        let resp = self.client.delete(&url).send().await.map_err(transport)?;
        check(resp).await.map(|_| ())
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn check(resp: Response) -> ApiResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::CONFLICT => ApiError::Conflict(message),
        other => ApiError::Status {
            code: other.as_u16(),
            message,
        },
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl RemoteApi for HttpApi {
    async fn current_user(&self) -> ApiResult<User> {
        self.get_json(&current_user_path()).await
    }

    async fn list_boards(&self) -> ApiResult<BoardList> {
        self.get_json(&boards_path()).await
    }

    async fn create_board(&self, args: &NewBoard) -> ApiResult<Board> {
        self.send_json(Method::POST, &boards_path(), args).await
    }

    async fn delete_board(&self, board_id: &str) -> ApiResult<()> {
        self.delete(&board_path(board_id)).await
    }

    async fn get_projects(&self, board_id: &str) -> ApiResult<Vec<Project>> {
        self.get_json(&board_projects_path(board_id)).await
    }

    async fn create_project(&self, args: &NewProject) -> ApiResult<Project> {
        self.send_json(Method::POST, &projects_path(), args).await
    }

    async fn update_project(&self, project_id: &str, args: &ProjectPatch) -> ApiResult<Project> {
        self.send_json(Method::PATCH, &project_path(project_id), args).await
    }

    async fn delete_project(&self, project_id: &str) -> ApiResult<()> {
        self.delete(&project_path(project_id)).await
    }

    async fn get_tasks(&self, project_id: &str) -> ApiResult<Vec<Task>> {
        self.get_json(&project_tasks_path(project_id)).await
    }

    async fn get_task(&self, task_id: &str) -> ApiResult<Option<Task>> {
        match self.get_json(&task_path(task_id)).await {
            Ok(task) => Ok(Some(task)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create_task(&self, args: &NewTask) -> ApiResult<Task> {
        self.send_json(Method::POST, &tasks_path(), args).await
    }

    async fn update_task(&self, task_id: &str, args: &TaskPatch) -> ApiResult<Task> {
        self.send_json(Method::PATCH, &task_path(task_id), args).await
    }

    async fn move_task(&self, task_id: &str, args: &MoveTaskArgs) -> ApiResult<Task> {
        self.send_json(Method::PATCH, &task_move_path(task_id), args).await
    }

    async fn delete_task(&self, task_id: &str) -> ApiResult<()> {
        self.delete(&task_path(task_id)).await
    }

    async fn search_users(&self, query: &str) -> ApiResult<Vec<User>> {
        self.get_json(&user_search_path(query)).await
    }

    async fn get_user(&self, user_id: &str) -> ApiResult<User> {
        self.get_json(&user_path(user_id)).await
    }
}
