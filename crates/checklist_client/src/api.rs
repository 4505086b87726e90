//! REST API client.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use checklist_core::{NewTask, Task, TaskId, TaskPatch};
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Server calls the view-model depends on.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> ClientResult<Vec<Task>>;
    /// Sends a patch carrying only the completion flag.
    async fn update_status(&self, id: TaskId, status: bool) -> ClientResult<Task>;
}

/// `reqwest`-backed client for the task endpoints.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct CreateTaskBody<'a> {
    name: &'a str,
    desc: &'a str,
    status: bool,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

impl HttpTaskApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub async fn create_task(&self, new_task: &NewTask) -> ClientResult<Task> {
        let body = CreateTaskBody {
            name: &new_task.name,
            desc: &new_task.desc,
            status: new_task.status,
        };
        let response = self.client.post(self.tasks_url()).json(&body).send().await?;
        decode(response).await
    }

    pub async fn get_task(&self, id: TaskId) -> ClientResult<Task> {
        let response = self.client.get(self.task_url(id)).send().await?;
        decode(response).await
    }

    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> ClientResult<Task> {
        let response = self.client.put(self.task_url(id)).json(patch).send().await?;
        decode(response).await
    }

    /// Returns `false` when the server had no such task.
    pub async fn delete_task(&self, id: TaskId) -> ClientResult<bool> {
        let response = self.client.delete(self.task_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        decode::<serde_json::Value>(response).await.map(|_| true)
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        let response = self.client.get(self.tasks_url()).send().await?;
        decode(response).await
    }

    async fn update_status(&self, id: TaskId, status: bool) -> ClientResult<Task> {
        self.update_task(id, &TaskPatch::status(status)).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    debug!(
        "event=http_response module=client status={} url={}",
        status.as_u16(),
        response.url().path()
    );
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let detail = match response.json::<ErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        detail,
    })
}
