use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskStatus;

/// A unit of work on the board, optionally scheduled on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Tasks without a date never appear on the timeline.
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub author: Option<String>,
    pub organization: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields submitted when creating a task. The remote store assigns `id`
/// and `created_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    /// `None` means `todo`.
    pub status: Option<TaskStatus>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub author: Option<String>,
    pub organization: Option<String>,
}

impl TaskDraft {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn status_or_default(&self) -> TaskStatus {
        self.status.unwrap_or_default()
    }
}

/// Changed fields for a task update.
///
/// Only `Some` fields are written. The inner `Option` of nullable columns
/// distinguishes "clear" (`Some(None)`) from "leave alone" (`None`).
/// Serializes to the changed fields only, which is what history records.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Option<NaiveTime>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Option<String>>,
}

impl TaskPatch {
    /// True when no field would be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.author.is_none()
            && self.organization.is_none()
    }

}

pub struct TaskPatchBuilder(TaskPatch);

impl TaskPatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskPatch::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.0.date = Some(date);
        self
    }

    #[must_use]
    pub const fn time(mut self, time: Option<NaiveTime>) -> Self {
        self.0.time = Some(time);
        self
    }

    #[must_use]
    pub fn author(mut self, author: Option<String>) -> Self {
        self.0.author = Some(author);
        self
    }

    #[must_use]
    pub fn organization(mut self, organization: Option<String>) -> Self {
        self.0.organization = Some(organization);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskPatch {
        self.0
    }
}

impl Default for TaskPatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = TaskPatch::default();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn patch_serializes_changed_fields_only() {
        let patch = TaskPatchBuilder::new()
            .title("Renamed")
            .description(None)
            .status(TaskStatus::Done)
            .build();
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({
                "title": "Renamed",
                "description": null,
                "status": "done",
            })
        );
    }

    #[test]
    fn draft_defaults_to_todo() {
        let draft = TaskDraft::new("Plan sprint");
        assert_eq!(draft.status_or_default(), TaskStatus::Todo);
    }
}
