//! Error types for the remote client and the workspace store

use thiserror::Error;

/// Errors surfaced by the remote API client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request never produced an HTTP response
    #[error("network error: {0}")]
    Transport(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Server rejected a stale write (HTTP 409)
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("server returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Worth retrying for reads: network failures, 429 and 5xx
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

/// Result type for remote calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by workspace store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("User not authenticated")]
    Unauthenticated,

    #[error("No board selected")]
    NoBoardSelected,

    #[error("Task not found")]
    TaskNotFound,

    #[error("Project not found")]
    ProjectNotFound,

    #[error(transparent)]
    Remote(#[from] ApiError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
