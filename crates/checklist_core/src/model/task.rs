//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted `Task` record and the `NewTask` create input.
//! - Centralize field validation shared by create, update and read paths.
//!
//! # Invariants
//! - `id` is assigned by the store and immutable afterwards.
//! - `name` is non-blank; `desc` may be empty but must be supplied.

use crate::model::patch::Patch;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned task identifier (SQLite rowid).
pub type TaskId = i64;

/// A single checklist entry.
///
/// Serialized as `{id, name, desc, status}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub desc: String,
    /// Completion flag; `true` means done.
    pub status: bool,
}

impl Task {
    /// Validates invariants that must hold for persisted tasks.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_name(&self.name)
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub desc: String,
    pub status: bool,
}

impl NewTask {
    /// Creates an incomplete task input.
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            status: false,
        }
    }

    /// Overrides the initial completion flag.
    pub fn with_status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    /// Builds a create input from wire fields; an absent `status` means incomplete.
    ///
    /// # Errors
    /// - `MissingField` when `name` or `desc` is not supplied.
    /// - `NullField` when any field is explicitly null.
    /// - `EmptyName` when `name` is blank.
    pub fn from_fields(
        name: Patch<String>,
        desc: Patch<String>,
        status: Patch<bool>,
    ) -> Result<Self, TaskValidationError> {
        let name = required(name, "name")?;
        let desc = required(desc, "desc")?;
        let status = match status {
            Patch::Absent => false,
            Patch::Null => return Err(TaskValidationError::NullField("status")),
            Patch::Value(status) => status,
        };
        let new_task = Self::new(name, desc).with_status(status);
        new_task.validate()?;
        Ok(new_task)
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_name(&self.name)
    }

    /// Attaches the store-assigned id.
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            name: self.name,
            desc: self.desc,
            status: self.status,
        }
    }
}

/// Rejected task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// A required field was not supplied.
    MissingField(&'static str),
    /// A field was explicitly set to null but does not accept null.
    NullField(&'static str),
    EmptyName,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "field `{field}` is required"),
            Self::NullField(field) => write!(f, "field `{field}` cannot be null"),
            Self::EmptyName => write!(f, "field `name` cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

fn required<T>(field: Patch<T>, name: &'static str) -> Result<T, TaskValidationError> {
    match field {
        Patch::Absent => Err(TaskValidationError::MissingField(name)),
        Patch::Null => Err(TaskValidationError::NullField(name)),
        Patch::Value(value) => Ok(value),
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), TaskValidationError> {
    if name.trim().is_empty() {
        return Err(TaskValidationError::EmptyName);
    }
    Ok(())
}
