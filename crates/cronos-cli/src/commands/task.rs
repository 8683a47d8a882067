use cronos_board::{DropCoordinator, ReorderReport};
use cronos_core::entities::{Task, TaskDraft, TaskPatchBuilder};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{TaskCommands, TaskFields};
use crate::commands::shared::parse::{clearable, optional, parse_date, parse_status, parse_time};
use crate::commands::shared::rows::TaskRow;
use crate::context::AppContext;
use crate::output::{output, output_rows};

#[derive(Serialize)]
struct RemoveResponse<'a> {
    removed: &'a str,
}

#[derive(Serialize)]
struct MoveResponse {
    moved: bool,
    task: Option<Task>,
    #[serde(flatten)]
    report: ReorderReport,
}

/// Handle `cronos task <subcommand>`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.task_store();

    match action {
        TaskCommands::List { status } => {
            let status = optional(status.as_deref(), parse_status)?;
            let tasks = store.load().await?;
            let mut rows: Vec<TaskRow<'_>> = tasks
                .iter()
                .filter(|task| status.is_none_or(|s| task.status == s))
                .map(TaskRow)
                .collect();
            if let Some(limit) = flags.limit {
                rows.truncate(usize::try_from(limit)?);
            }
            output_rows(&rows, flags.format)
        }
        TaskCommands::Create { title, fields } => {
            let draft = draft(title, fields)?;
            let task = store.create(draft).await?;
            output(&task, flags.format)
        }
        TaskCommands::Update { id, title, fields } => {
            let mut patch = TaskPatchBuilder::new();
            if let Some(title) = title {
                patch = patch.title(title.as_str());
            }
            if let Some(description) = clearable(fields.description.as_deref(), text)? {
                patch = patch.description(description);
            }
            if let Some(status) = optional(fields.status.as_deref(), parse_status)? {
                patch = patch.status(status);
            }
            if let Some(date) = clearable(fields.date.as_deref(), parse_date)? {
                patch = patch.date(date);
            }
            if let Some(time) = clearable(fields.time.as_deref(), parse_time)? {
                patch = patch.time(time);
            }
            if let Some(author) = clearable(fields.author.as_deref(), text)? {
                patch = patch.author(author);
            }
            if let Some(organization) = clearable(fields.organization.as_deref(), text)? {
                patch = patch.organization(organization);
            }

            store.update(id, patch.build()).await?;
            match store.get(id) {
                Some(task) => output(&task, flags.format),
                None => Ok(()),
            }
        }
        TaskCommands::Remove { id } => {
            store.load().await?;
            store.remove(id).await?;
            output(&RemoveResponse { removed: id }, flags.format)
        }
        TaskCommands::Move { id, target } => {
            let tasks = store.load().await?;
            if !tasks.iter().any(|task| &task.id == id) {
                anyhow::bail!("task not found: {id}");
            }

            let mut coordinator = DropCoordinator::new();
            coordinator.start(id.as_str());
            let Some(intent) = coordinator.end(Some(target.as_str()), &tasks) else {
                return output(
                    &MoveResponse {
                        moved: false,
                        task: store.get(id),
                        report: ReorderReport::default(),
                    },
                    flags.format,
                );
            };

            let report = store.drop_task(&intent).await;
            let clean = report.is_clean();
            output(
                &MoveResponse {
                    moved: true,
                    task: store.get(id),
                    report,
                },
                flags.format,
            )?;
            if !clean {
                anyhow::bail!("the new status of {id} was not saved");
            }
            Ok(())
        }
    }
}

fn draft(title: &str, fields: &TaskFields) -> anyhow::Result<TaskDraft> {
    Ok(TaskDraft {
        title: title.to_string(),
        description: optional(fields.description.as_deref(), text)?,
        status: optional(fields.status.as_deref(), parse_status)?,
        date: optional(fields.date.as_deref(), parse_date)?,
        time: optional(fields.time.as_deref(), parse_time)?,
        author: optional(fields.author.as_deref(), text)?,
        organization: optional(fields.organization.as_deref(), text)?,
    })
}

fn text(raw: &str) -> anyhow::Result<String> {
    Ok(raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use cronos_core::enums::TaskStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn draft_parses_and_drops_blank_fields() {
        let fields = TaskFields {
            description: Some("  ".into()),
            status: Some("done".into()),
            date: Some("2025-03-14".into()),
            author: Some(" dana ".into()),
            ..TaskFields::default()
        };
        let draft = draft("Ship", &fields).unwrap();
        assert_eq!(draft.description, None);
        assert_eq!(draft.status, Some(TaskStatus::Done));
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(draft.author.as_deref(), Some("dana"));
    }

    #[test]
    fn draft_rejects_bad_time() {
        let fields = TaskFields {
            time: Some("25:00".into()),
            ..TaskFields::default()
        };
        assert!(draft("Ship", &fields).is_err());
    }
}
