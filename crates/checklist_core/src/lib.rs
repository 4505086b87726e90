//! Core domain logic for the task checklist.
//! This crate is the single source of truth for task invariants and storage.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbHandle, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::patch::{Patch, TaskPatch};
pub use model::score::{completion_score, score_from_counts};
pub use model::task::{NewTask, Task, TaskId, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::TaskService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
