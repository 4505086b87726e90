//! Task use-case service.
//!
//! # Responsibility
//! - Provide the task store entry points (create, list, get, update, delete).
//! - Acquire the injected connection once per call and release it on return.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - An update's read and write run under one connection guard, so they
//!   cannot interleave with another call on the same handle.
//! - Task names and descriptions are never logged.

use crate::db::{seed_default_tasks, DbHandle};
use crate::model::patch::TaskPatch;
use crate::model::task::{NewTask, Task, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
use log::{debug, error, info, warn};
use std::time::Instant;

/// Use-case service wrapper for task CRUD operations.
#[derive(Clone)]
pub struct TaskService {
    db: DbHandle,
}

impl TaskService {
    /// Creates a service over the provided connection handle.
    pub fn new(db: DbHandle) -> Self {
        Self { db }
    }

    /// Creates a task and returns it with the store-assigned id.
    pub fn create_task(&self, new_task: &NewTask) -> RepoResult<Task> {
        let started_at = Instant::now();
        let result = self.with_repo(|repo| repo.create_task(new_task));
        match &result {
            Ok(task) => info!(
                "event=task_create module=service status=ok task_id={} duration_ms={}",
                task.id,
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("task_create", None, err),
        }
        result
    }

    /// Lists all tasks in id order.
    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let result = self.with_repo(|repo| repo.list_tasks());
        match &result {
            Ok(tasks) => debug!(
                "event=task_list module=service status=ok count={}",
                tasks.len()
            ),
            Err(err) => log_failure("task_list", None, err),
        }
        result
    }

    /// Gets one task by id.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no task has this id.
    pub fn get_task(&self, id: TaskId) -> RepoResult<Task> {
        let result = self.with_repo(|repo| repo.get_task(id)?.ok_or(RepoError::NotFound(id)));
        if let Err(err) = &result {
            log_failure("task_get", Some(id), err);
        }
        result
    }

    /// Applies a sparse patch to an existing task.
    ///
    /// # Errors
    /// - `RepoError::Validation` when the patch carries null or blank values.
    /// - `RepoError::NotFound` when no task has this id; nothing is written.
    pub fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        let started_at = Instant::now();
        let result = self.with_repo(|repo| repo.update_task(id, patch));
        match &result {
            Ok(task) => info!(
                "event=task_update module=service status=ok task_id={} done={} duration_ms={}",
                task.id,
                task.status,
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("task_update", Some(id), err),
        }
        result
    }

    /// Deletes a task; returns `false` when there was nothing to delete.
    pub fn delete_task(&self, id: TaskId) -> RepoResult<bool> {
        let result = self.with_repo(|repo| repo.delete_task(id));
        match &result {
            Ok(deleted) => info!(
                "event=task_delete module=service status=ok task_id={} deleted={}",
                id, deleted
            ),
            Err(err) => log_failure("task_delete", Some(id), err),
        }
        result
    }

    /// Seeds the built-in default tasks into an empty store.
    pub fn seed_defaults(&self) -> RepoResult<usize> {
        let mut conn = self.db.acquire()?;
        Ok(seed_default_tasks(&mut conn)?)
    }

    fn with_repo<T>(
        &self,
        f: impl FnOnce(&SqliteTaskRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = self.db.acquire()?;
        let repo = SqliteTaskRepository::new(&conn);
        f(&repo)
    }
}

fn log_failure(event: &str, id: Option<TaskId>, err: &RepoError) {
    let task_id = id.map_or_else(|| "-".to_string(), |id| id.to_string());
    match err {
        RepoError::NotFound(_) | RepoError::Validation(_) => warn!(
            "event={event} module=service status=rejected task_id={task_id} error={err}"
        ),
        RepoError::Db(_) | RepoError::InvalidData(_) => error!(
            "event={event} module=service status=error task_id={task_id} error={err}"
        ),
    }
}
