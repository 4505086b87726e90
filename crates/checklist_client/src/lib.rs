//! Client side of the task checklist.
//!
//! # Responsibility
//! - Hold the in-memory task list a UI renders.
//! - Apply completion toggles optimistically and reconcile with the server.
//! - Talk to the REST backend through the `TaskApi` seam.

pub mod api;
pub mod config;
pub mod error;
pub mod view_model;

pub use api::{HttpTaskApi, TaskApi};
pub use config::{ClientConfig, FallbackPolicy};
pub use error::{ClientError, ClientResult};
pub use view_model::{placeholder_tasks, ChecklistViewModel, LoadState, TaskSource, ToggleOutcome};
