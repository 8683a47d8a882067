use cronos_board::views::board;
use cronos_core::entities::Task;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{Tabular, cell, output, output_rows};

#[derive(Serialize)]
struct BoardRow<'a> {
    column: &'static str,
    #[serde(flatten)]
    task: &'a Task,
}

impl Tabular for BoardRow<'_> {
    const HEADERS: &'static [&'static str] = &["column", "id", "title", "due"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.column.to_string(),
            self.task.id.clone(),
            self.task.title.clone(),
            cell(self.task.date),
        ]
    }
}

/// Handle `cronos board`: tasks grouped into the three status columns.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let tasks = ctx.task_store().load().await?;
    let columns = board(&tasks);

    if flags.format != OutputFormat::Table {
        return output(&columns, flags.format);
    }

    let rows: Vec<BoardRow<'_>> = columns
        .columns()
        .flat_map(|(status, tasks)| {
            tasks.iter().map(move |task| BoardRow {
                column: status.label(),
                task,
            })
        })
        .collect();
    output_rows(&rows, flags.format)
}
