use chrono::NaiveDate;
use cronos_core::entities::HistoryEntry;
use serde_json::Value;

/// Shown when there is no history to list.
pub const EMPTY_HISTORY: &str = "No history yet. Start creating and editing tasks!";

/// The `limit` most recent entries, newest first.
#[must_use]
pub fn recent_history(entries: &[HistoryEntry], limit: usize) -> Vec<HistoryEntry> {
    let mut recent = entries.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(limit);
    recent
}

/// Labelled fields of a history snapshot worth displaying.
///
/// Dates render as `Mar 14, 2025`.
#[must_use]
pub fn snapshot_fields(value: &Value) -> Vec<(&'static str, String)> {
    const FIELDS: [(&str, &str); 4] = [
        ("title", "Title"),
        ("description", "Description"),
        ("status", "Status"),
        ("date", "Due Date"),
    ];

    FIELDS
        .iter()
        .filter_map(|(key, label)| match value.get(key)? {
            Value::String(s) if !s.is_empty() => Some((*label, display(key, s))),
            _ => None,
        })
        .collect()
}

fn display(key: &str, raw: &str) -> String {
    if key == "date" {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.format("%b %d, %Y").to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use cronos_core::enums::HistoryAction;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn entry(id: &str, minutes_ago: i64) -> HistoryEntry {
        HistoryEntry {
            id: id.into(),
            task_id: "tsk-1".into(),
            user_id: "user_1".into(),
            action: HistoryAction::Updated,
            old_value: None,
            new_value: None,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn newest_first_and_truncated() {
        let entries: Vec<_> = (0..60).map(|n| entry(&format!("hst-{n}"), n)).rev().collect();
        let recent = recent_history(&entries, 50);
        assert_eq!(recent.len(), 50);
        assert_eq!(recent[0].id, "hst-0");
        assert_eq!(recent[49].id, "hst-49");
    }

    #[test]
    fn snapshot_fields_pick_known_keys() {
        let value = json!({
            "id": "tsk-1",
            "title": "Ship",
            "description": null,
            "status": "done",
            "date": "2025-03-14",
        });
        assert_eq!(
            snapshot_fields(&value),
            vec![
                ("Title", "Ship".to_string()),
                ("Status", "done".to_string()),
                ("Due Date", "Mar 14, 2025".to_string()),
            ]
        );
    }
}
