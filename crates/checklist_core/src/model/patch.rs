//! Sparse update model.
//!
//! # Responsibility
//! - Represent "field not supplied" separately from "field explicitly null".
//! - Apply a sparse patch onto an existing task.
//!
//! # Invariants
//! - A missing JSON key deserializes to `Patch::Absent`.
//! - A JSON `null` deserializes to `Patch::Null`, never to `Absent`.
//! - `Absent` fields are never serialized.

use crate::model::task::{validate_name, Task, TaskValidationError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tri-state value for one field of a sparse update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field not supplied; keep the stored value.
    Absent,
    /// Field supplied as null.
    Null,
    /// Field supplied with a value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Null, Self::Value))
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

/// Sparse update for a task; only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub desc: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub status: Patch<bool>,
}

impl TaskPatch {
    /// Patch that only changes the completion flag.
    pub fn status(status: bool) -> Self {
        Self {
            status: Patch::Value(status),
            ..Self::default()
        }
    }

    /// Returns whether no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_absent() && self.desc.is_absent() && self.status.is_absent()
    }

    /// Rejects null values and blank names.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        match &self.name {
            Patch::Null => return Err(TaskValidationError::NullField("name")),
            Patch::Value(name) => validate_name(name)?,
            Patch::Absent => {}
        }
        if matches!(self.desc, Patch::Null) {
            return Err(TaskValidationError::NullField("desc"));
        }
        if matches!(self.status, Patch::Null) {
            return Err(TaskValidationError::NullField("status"));
        }
        Ok(())
    }

    /// Returns `task` with every supplied field replaced.
    ///
    /// Callers validate first; `Null` entries are treated as not supplied.
    pub fn apply(&self, task: &Task) -> Task {
        Task {
            id: task.id,
            name: self.name.as_value().cloned().unwrap_or_else(|| task.name.clone()),
            desc: self.desc.as_value().cloned().unwrap_or_else(|| task.desc.clone()),
            status: self.status.as_value().copied().unwrap_or(task.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Patch, TaskPatch};
    use crate::model::task::{NewTask, TaskValidationError};

    #[test]
    fn missing_and_null_keys_are_distinguished() {
        let patch: TaskPatch = serde_json::from_str(r#"{"desc": null, "status": true}"#).unwrap();
        assert_eq!(patch.name, Patch::Absent);
        assert_eq!(patch.desc, Patch::Null);
        assert_eq!(patch.status, Patch::Value(true));
    }

    #[test]
    fn empty_object_is_empty_patch() {
        let patch: TaskPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        assert_eq!(patch.validate(), Ok(()));
    }

    #[test]
    fn serialization_skips_absent_fields() {
        let json = serde_json::to_value(TaskPatch::status(true)).unwrap();
        assert_eq!(json, serde_json::json!({"status": true}));
    }

    #[test]
    fn validate_rejects_null_and_blank_name() {
        let null_status: TaskPatch = serde_json::from_str(r#"{"status": null}"#).unwrap();
        assert_eq!(
            null_status.validate(),
            Err(TaskValidationError::NullField("status"))
        );

        let blank_name = TaskPatch {
            name: Patch::Value(" ".to_string()),
            ..TaskPatch::default()
        };
        assert_eq!(blank_name.validate(), Err(TaskValidationError::EmptyName));
    }

    #[test]
    fn apply_changes_only_supplied_fields() {
        let task = NewTask::new("Task-1", "first").into_task(3);

        let toggled = TaskPatch::status(true).apply(&task);
        assert_eq!(toggled.id, 3);
        assert_eq!(toggled.name, "Task-1");
        assert_eq!(toggled.desc, "first");
        assert!(toggled.status);

        let renamed = TaskPatch {
            name: Patch::from("renamed".to_string()),
            ..TaskPatch::default()
        }
        .apply(&task);
        assert_eq!(renamed.name, "renamed");
        assert!(!renamed.status);
    }
}
