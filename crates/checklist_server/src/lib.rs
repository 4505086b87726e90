//! HTTP REST adapter for the task checklist.
//!
//! # Responsibility
//! - Expose task store operations as JSON endpoints.
//! - Translate store errors into HTTP status codes.
//!
//! # Invariants
//! - Handlers never touch SQLite directly; all access goes through
//!   `TaskService` on the blocking thread pool.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::{build_router, AppState};

use anyhow::Context;
use checklist_core::{DbHandle, TaskService};
use log::info;
use tokio::net::TcpListener;

/// Opens the store described by `config` and serves until shutdown.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let db = DbHandle::open(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let service = TaskService::new(db);

    if config.seed_enabled() {
        let inserted = service
            .seed_defaults()
            .context("failed to seed default tasks")?;
        info!("event=server_seed module=server status=ok inserted={inserted}");
    }

    let app = build_router(AppState::new(service), config.cors_layer()?);
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind `{}`", config.bind))?;
    let local_addr = listener.local_addr()?;

    info!("event=server_listen module=server status=ok addr=http://{local_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
