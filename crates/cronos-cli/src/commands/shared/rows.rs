//! Table rows shared by several commands.

use chrono::Local;
use cronos_core::entities::{HistoryEntry, Task};
use cronos_core::enums::HistoryAction;
use serde::Serialize;

use crate::output::{Tabular, cell};

/// A task serialized as itself, tabulated as one row.
#[derive(Serialize)]
#[serde(transparent)]
pub struct TaskRow<'a>(pub &'a Task);

impl Tabular for TaskRow<'_> {
    const HEADERS: &'static [&'static str] = &["id", "title", "status", "date", "time", "author"];

    fn cells(&self) -> Vec<String> {
        let task = self.0;
        vec![
            task.id.clone(),
            task.title.clone(),
            task.status.to_string(),
            cell(task.date),
            cell(task.time.map(|t| t.format("%H:%M"))),
            cell(task.author.as_deref()),
        ]
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct HistoryRow<'a>(pub &'a HistoryEntry);

impl Tabular for HistoryRow<'_> {
    const HEADERS: &'static [&'static str] = &["when", "action", "task", "details"];

    fn cells(&self) -> Vec<String> {
        let entry = self.0;
        vec![
            entry
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            entry.action.to_string(),
            entry.task_id.clone(),
            describe(entry),
        ]
    }
}

fn describe(entry: &HistoryEntry) -> String {
    let status = |value: &Option<serde_json::Value>| {
        value
            .as_ref()
            .and_then(|v| v.get("status"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("?")
            .to_string()
    };

    if entry.action == HistoryAction::StatusChanged {
        return format!("{} -> {}", status(&entry.old_value), status(&entry.new_value));
    }

    entry
        .new_value
        .as_ref()
        .or(entry.old_value.as_ref())
        .map(|value| {
            cronos_board::views::snapshot_fields(value)
                .into_iter()
                .map(|(label, text)| format!("{label}: {text}"))
                .collect::<Vec<_>>()
                .join("; ")
        })
        .unwrap_or_default()
}
