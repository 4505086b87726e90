//! Task endpoint handlers.

use crate::error::{ApiError, ApiResult};
use crate::routes::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use checklist_core::{
    core_version, NewTask, Patch, RepoResult, Task, TaskId, TaskPatch, TaskService,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Create body; a missing or null field becomes a 422.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub desc: Patch<String>,
    #[serde(default)]
    pub status: Patch<bool>,
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Task Manager API",
        "version": core_version(),
    }))
}

pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = run_blocking(state.service, |service| service.list_tasks()).await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(body) = body?;
    let new_task = NewTask::from_fields(body.name, body.desc, body.status)?;
    let task = run_blocking(state.service, move |service| service.create_task(&new_task)).await?;
    Ok(Json(task))
}

pub async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<Json<Task>> {
    let Path(id) = id?;
    let task = run_blocking(state.service, move |service| service.get_task(id)).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
    patch: Result<Json<TaskPatch>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Path(id) = id?;
    let Json(patch) = patch?;
    let task = run_blocking(state.service, move |service| service.update_task(id, &patch)).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id?;
    let deleted = run_blocking(state.service, move |service| service.delete_task(id)).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}

/// Runs a synchronous store call on the blocking pool.
async fn run_blocking<T, F>(service: TaskService, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&TaskService) -> RepoResult<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|err| ApiError::Internal(format!("store task aborted: {err}")))?;
    Ok(result?)
}
