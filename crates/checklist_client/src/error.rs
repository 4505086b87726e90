//! Client error taxonomy.

use checklist_core::TaskId;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport, timeout or body decoding failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Server answered with a non-success status.
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },
    /// The view-model holds no task with this id.
    #[error("task {0} is not in the loaded list")]
    UnknownTask(TaskId),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
