use cronos_board::views::{EMPTY_TIMELINE, timeline};
use cronos_core::entities::Task;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{Tabular, cell, output, output_rows};

#[derive(Serialize)]
#[serde(transparent)]
struct TimelineRow<'a>(&'a Task);

impl Tabular for TimelineRow<'_> {
    const HEADERS: &'static [&'static str] = &["date", "time", "title", "status", "id"];

    fn cells(&self) -> Vec<String> {
        let task = self.0;
        vec![
            cell(task.date.map(|d| d.format("%a %b %d, %Y"))),
            cell(task.time.map(|t| t.format("%H:%M"))),
            task.title.clone(),
            task.status.label().to_string(),
            task.id.clone(),
        ]
    }
}

/// Handle `cronos timeline`: dated tasks in date and time order.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let tasks = ctx.task_store().load().await?;
    let timeline = timeline(&tasks);

    if flags.format != OutputFormat::Table {
        return output(&timeline, flags.format);
    }
    if timeline.is_empty() {
        println!("{EMPTY_TIMELINE}");
        return Ok(());
    }

    let rows: Vec<TimelineRow<'_>> = timeline.iter().map(TimelineRow).collect();
    output_rows(&rows, flags.format)
}
