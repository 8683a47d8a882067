use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entities::{Task, TaskPatch};
use crate::enums::{HistoryAction, TaskStatus};
use crate::errors::CoreError;

/// An append-only record of one task mutation.
///
/// `old_value` and `new_value` hold partial task snapshots relevant to the
/// action, keyed by the task's serialized field names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub action: HistoryAction,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// A history entry before the remote store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub task_id: String,
    pub action: HistoryAction,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
}

impl NewHistoryEntry {
    /// `created`: the full new record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if the task cannot be encoded.
    pub fn created(task: &Task) -> Result<Self, CoreError> {
        Ok(Self {
            task_id: task.id.clone(),
            action: HistoryAction::Created,
            old_value: None,
            new_value: Some(serde_json::to_value(task)?),
        })
    }

    /// `updated`: the submitted fields. The old values are not diffed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if the patch cannot be encoded.
    pub fn updated(task_id: &str, patch: &TaskPatch) -> Result<Self, CoreError> {
        Ok(Self {
            task_id: task_id.to_string(),
            action: HistoryAction::Updated,
            old_value: None,
            new_value: Some(serde_json::to_value(patch)?),
        })
    }

    /// `status_changed`: `{status: from}` -> `{status: to}`.
    #[must_use]
    pub fn status_changed(task_id: &str, from: TaskStatus, to: TaskStatus) -> Self {
        Self {
            task_id: task_id.to_string(),
            action: HistoryAction::StatusChanged,
            old_value: Some(json!({ "status": from })),
            new_value: Some(json!({ "status": to })),
        }
    }

    /// `deleted`: the last known record, when the caller had one cached.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if the task cannot be encoded.
    pub fn deleted(task_id: &str, last_known: Option<&Task>) -> Result<Self, CoreError> {
        Ok(Self {
            task_id: task_id.to_string(),
            action: HistoryAction::Deleted,
            old_value: last_known.map(serde_json::to_value).transpose()?,
            new_value: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TaskPatchBuilder;
    use pretty_assertions::assert_eq;

    fn task(id: &str) -> Task {
        Task {
            id: id.into(),
            title: "Ship it".into(),
            description: None,
            status: TaskStatus::InProgress,
            date: None,
            time: None,
            author: Some("dana".into()),
            organization: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn status_changed_snapshots() {
        let entry =
            NewHistoryEntry::status_changed("tsk-1", TaskStatus::Todo, TaskStatus::InProgress);
        assert_eq!(entry.action, HistoryAction::StatusChanged);
        assert_eq!(entry.old_value, Some(json!({ "status": "todo" })));
        assert_eq!(entry.new_value, Some(json!({ "status": "in-progress" })));
    }

    #[test]
    fn created_carries_full_record() {
        let task = task("tsk-2");
        let entry = NewHistoryEntry::created(&task).unwrap();
        assert_eq!(entry.task_id, "tsk-2");
        assert!(entry.old_value.is_none());
        let new_value = entry.new_value.unwrap();
        assert_eq!(new_value["title"], "Ship it");
        assert_eq!(new_value["status"], "in-progress");
        assert_eq!(new_value["author"], "dana");
    }

    #[test]
    fn updated_has_no_old_value() {
        let patch = TaskPatchBuilder::new().title("Ship it today").build();
        let entry = NewHistoryEntry::updated("tsk-3", &patch).unwrap();
        assert!(entry.old_value.is_none());
        assert_eq!(entry.new_value, Some(json!({ "title": "Ship it today" })));
    }

    #[test]
    fn deleted_without_cached_task() {
        let entry = NewHistoryEntry::deleted("tsk-4", None).unwrap();
        assert_eq!(entry.action, HistoryAction::Deleted);
        assert!(entry.old_value.is_none());
        assert!(entry.new_value.is_none());
    }
}
