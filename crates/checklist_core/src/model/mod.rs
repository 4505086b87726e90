//! Domain model for the task checklist.
//!
//! # Responsibility
//! - Define the canonical task record and its create/update inputs.
//! - Hold pure derived-state helpers (completion score).
//!
//! # Invariants
//! - Every task is identified by a store-assigned `TaskId` that is never
//!   reused.
//! - A task name is never blank.

pub mod patch;
pub mod score;
pub mod task;
