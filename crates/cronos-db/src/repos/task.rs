//! Task repository: CRUD and status writes.

use chrono::Utc;
use cronos_core::entities::{Task, TaskDraft, TaskPatch};
use cronos_core::enums::{Table, TaskStatus};
use cronos_core::ids::PREFIX_TASK;
use cronos_core::remote::ChangeKind;

use crate::CronosDb;
use crate::error::DatabaseError;
use crate::helpers::{
    format_date, format_time, format_timestamp, get_opt_string, opt_text, parse_datetime,
    parse_enum, parse_optional_date, parse_optional_time,
};

const SELECT_COLS: &str =
    "id, title, description, status, due_date, due_time, author, organization, created_at";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: get_opt_string(row, 2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        date: parse_optional_date(get_opt_string(row, 4)?.as_deref())?,
        time: parse_optional_time(get_opt_string(row, 5)?.as_deref())?,
        author: get_opt_string(row, 6)?,
        organization: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

fn not_found(id: &str) -> DatabaseError {
    DatabaseError::NotFound {
        table: Table::Tasks,
        id: id.to_string(),
    }
}

impl CronosDb {
    /// Insert a task owned by `user_id` and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn create_task(&self, user_id: &str, draft: &TaskDraft) -> Result<Task, DatabaseError> {
        let id = self.generate_id(PREFIX_TASK).await?;
        let params: Vec<libsql::Value> = vec![
            id.as_str().into(),
            user_id.into(),
            draft.title.as_str().into(),
            opt_text(draft.description.as_deref()),
            draft.status_or_default().as_str().into(),
            opt_text(draft.date.map(format_date).as_deref()),
            opt_text(draft.time.map(format_time).as_deref()),
            opt_text(draft.author.as_deref()),
            opt_text(draft.organization.as_deref()),
            format_timestamp(Utc::now()).into(),
        ];

        self.execute_with(
            "INSERT INTO tasks (id, user_id, title, description, status, due_date, due_time,
                                author, organization, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            || libsql::params_from_iter(params.clone()),
        )
        .await?;

        self.publish(Table::Tasks, ChangeKind::Insert, &id);
        tracing::info!(task_id = %id, "task created");
        self.get_task(user_id, &id).await
    }

    /// The task `id` if `user_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if `user_id` has no task with this id.
    pub async fn get_task(&self, user_id: &str, id: &str) -> Result<Task, DatabaseError> {
        let mut rows = self
            .query_with(
                &format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1 AND user_id = ?2"),
                || [id, user_id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| not_found(id))?;
        row_to_task(&row)
    }

    /// All tasks of `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>, DatabaseError> {
        let mut rows = self
            .query_with(
                &format!(
                    "SELECT {SELECT_COLS} FROM tasks WHERE user_id = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                || [user_id],
            )
            .await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }

    /// Write the fields present in `patch` to a task owned by `user_id`.
    ///
    /// An empty patch writes nothing but still fails for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if `user_id` has no task with this id.
    pub async fn update_task(
        &self,
        user_id: &str,
        id: &str,
        patch: &TaskPatch,
    ) -> Result<(), DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        let mut push = |column: &str, value: libsql::Value| {
            params.push(value);
            sets.push(format!("{column} = ?{}", params.len()));
        };

        if let Some(title) = &patch.title {
            push("title", title.as_str().into());
        }
        if let Some(description) = &patch.description {
            push("description", opt_text(description.as_deref()));
        }
        if let Some(status) = patch.status {
            push("status", status.as_str().into());
        }
        if let Some(date) = patch.date {
            push("due_date", opt_text(date.map(format_date).as_deref()));
        }
        if let Some(time) = patch.time {
            push("due_time", opt_text(time.map(format_time).as_deref()));
        }
        if let Some(author) = &patch.author {
            push("author", opt_text(author.as_deref()));
        }
        if let Some(organization) = &patch.organization {
            push("organization", opt_text(organization.as_deref()));
        }

        if sets.is_empty() {
            self.get_task(user_id, id).await?;
            return Ok(());
        }

        params.push(id.into());
        params.push(user_id.into());
        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ?{} AND user_id = ?{}",
            sets.join(", "),
            params.len() - 1,
            params.len()
        );
        let affected = self
            .execute_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;
        if affected == 0 {
            return Err(not_found(id));
        }

        self.publish(Table::Tasks, ChangeKind::Update, id);
        tracing::info!(task_id = %id, fields = sets.len(), "task updated");
        Ok(())
    }

    /// Write the status column only.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if `user_id` has no task with this id.
    pub async fn update_task_status(
        &self,
        user_id: &str,
        id: &str,
        status: TaskStatus,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .execute_with(
                "UPDATE tasks SET status = ?1 WHERE id = ?2 AND user_id = ?3",
                || [status.as_str(), id, user_id],
            )
            .await?;
        if affected == 0 {
            return Err(not_found(id));
        }

        self.publish(Table::Tasks, ChangeKind::Update, id);
        tracing::info!(task_id = %id, %status, "task status updated");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if `user_id` has no task with this id.
    pub async fn delete_task(&self, user_id: &str, id: &str) -> Result<(), DatabaseError> {
        let affected = self
            .execute_with(
                "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
                || [id, user_id],
            )
            .await?;
        if affected == 0 {
            return Err(not_found(id));
        }

        self.publish(Table::Tasks, ChangeKind::Delete, id);
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }
}
