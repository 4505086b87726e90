//! Router assembly and shared request state.

use crate::handlers;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use checklist_core::TaskService;
use log::info;
use std::time::Instant;
use tower_http::cors::CorsLayer;

pub const ROOT: &str = "/";
pub const TASKS: &str = "/tasks";
pub const TASK_BY_ID: &str = "/tasks/{id}";

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: TaskService,
}

impl AppState {
    pub fn new(service: TaskService) -> Self {
        Self { service }
    }
}

/// Builds the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route(ROOT, get(handlers::root))
        .route(
            TASKS,
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            TASK_BY_ID,
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .layer(middleware::from_fn(log_request))
        .layer(cors)
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    info!(
        "event=http_request module=server status={} method={} path={} duration_ms={}",
        response.status().as_u16(),
        method,
        path,
        started_at.elapsed().as_millis()
    );
    response
}
