//! Task history repository. Append-only: there is no update or delete.

use chrono::Utc;
use cronos_core::entities::{HistoryEntry, NewHistoryEntry};
use cronos_core::enums::Table;
use cronos_core::ids::PREFIX_HISTORY;
use cronos_core::remote::ChangeKind;

use crate::CronosDb;
use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, opt_text, parse_datetime, parse_enum, parse_optional_json};

const SELECT_COLS: &str = "id, task_id, user_id, action, old_value, new_value, created_at";

fn row_to_entry(row: &libsql::Row) -> Result<HistoryEntry, DatabaseError> {
    Ok(HistoryEntry {
        id: row.get(0)?,
        task_id: row.get(1)?,
        user_id: row.get(2)?,
        action: parse_enum(&row.get::<String>(3)?)?,
        old_value: parse_optional_json(get_opt_string(row, 4)?.as_deref())?,
        new_value: parse_optional_json(get_opt_string(row, 5)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn json_text(value: Option<&serde_json::Value>) -> libsql::Value {
    opt_text(value.map(ToString::to_string).as_deref())
}

impl CronosDb {
    /// Append one history entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_history(
        &self,
        user_id: &str,
        entry: &NewHistoryEntry,
    ) -> Result<HistoryEntry, DatabaseError> {
        let id = self.generate_id(PREFIX_HISTORY).await?;
        let now = Utc::now();
        let params: Vec<libsql::Value> = vec![
            id.as_str().into(),
            entry.task_id.as_str().into(),
            user_id.into(),
            entry.action.as_str().into(),
            json_text(entry.old_value.as_ref()),
            json_text(entry.new_value.as_ref()),
            format_timestamp(now).into(),
        ];

        self.execute_with(
            &format!("INSERT INTO task_history ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            || libsql::params_from_iter(params.clone()),
        )
        .await?;

        self.publish(Table::TaskHistory, ChangeKind::Insert, &id);
        tracing::debug!(history_id = %id, task_id = %entry.task_id, action = %entry.action, "history appended");

        Ok(HistoryEntry {
            id,
            task_id: entry.task_id.clone(),
            user_id: user_id.to_string(),
            action: entry.action,
            old_value: entry.old_value.clone(),
            new_value: entry.new_value.clone(),
            created_at: parse_datetime(&format_timestamp(now))?,
        })
    }

    /// The latest `limit` entries of `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn list_history(&self, user_id: &str, limit: u32) -> Result<Vec<HistoryEntry>, DatabaseError> {
        let mut rows = self
            .query_with(
                &format!(
                    "SELECT {SELECT_COLS} FROM task_history WHERE user_id = ?1
                     ORDER BY created_at DESC, rowid DESC LIMIT ?2"
                ),
                || libsql::params![user_id, i64::from(limit)],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }
}
