//! HTTP error mapping.
//!
//! Every failure is rendered as `{"detail": "<message>"}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use checklist_core::{RepoError, TaskValidationError};
use log::error;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Task not found")]
    NotFound,
    #[error("{0}")]
    Validation(#[from] TaskValidationError),
    /// Request could not be extracted (bad JSON, bad path segment).
    #[error("{message}")]
    BadRequest { status: StatusCode, message: String },
    /// Storage or runtime failure; the cause is logged, not returned.
    #[error("internal storage error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_) => Self::NotFound,
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::Db(_) | RepoError::InvalidData(_) => Self::Internal(value.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            error!("event=http_error module=server status=error error={cause}");
        }
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (self.status(), body).into_response()
    }
}
