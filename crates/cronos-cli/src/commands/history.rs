use std::collections::HashSet;
use std::time::Duration;

use cronos_board::HistoryFeed;
use cronos_board::views::{EMPTY_HISTORY, recent_history};
use cronos_core::entities::HistoryEntry;

use crate::cli::root_commands::HistoryArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::rows::HistoryRow;
use crate::context::AppContext;
use crate::output::output_rows;

/// How often `--follow` also polls the database for writes made elsewhere.
const FOLLOW_POLL: Duration = Duration::from_secs(2);

/// Handle `cronos history`.
pub async fn handle(
    args: &HistoryArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(None, flags.limit, ctx.config.general.history_limit);
    let mut feed = HistoryFeed::open(ctx.remote.clone(), ctx.session.clone(), limit).await?;

    let entries = recent_history(feed.entries(), usize::try_from(limit)?);
    if entries.is_empty() && flags.format == OutputFormat::Table {
        println!("{EMPTY_HISTORY}");
    } else {
        print(&entries, flags)?;
    }

    if !args.follow {
        feed.close();
        return Ok(());
    }

    let mut seen: HashSet<String> = entries.into_iter().map(|entry| entry.id).collect();
    let mut poll = tokio::time::interval(FOLLOW_POLL);
    poll.tick().await;

    loop {
        tokio::select! {
            changed = feed.next_change() => {
                if !changed? {
                    break;
                }
            }
            _ = poll.tick() => {
                ctx.db.sync().await?;
                feed.refresh().await?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }

        let mut fresh: Vec<HistoryEntry> = feed
            .entries()
            .iter()
            .filter(|entry| seen.insert(entry.id.clone()))
            .cloned()
            .collect();
        if !fresh.is_empty() {
            fresh.reverse();
            print(&fresh, flags)?;
        }
        ctx.flush_notices(flags);
    }

    feed.close();
    Ok(())
}

fn print(entries: &[HistoryEntry], flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows: Vec<HistoryRow<'_>> = entries.iter().map(HistoryRow).collect();
    output_rows(&rows, flags.format)
}
