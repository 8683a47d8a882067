use clap::{Args, Subcommand};
use cronos_core::enums::View;

use crate::cli::subcommands::{AuthCommands, PlaylistCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in and out.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Tasks.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Tasks by board column.
    Board,
    /// Dated tasks grouped by day.
    Timeline,
    /// Recent task history.
    History(HistoryArgs),
    /// Video playlists.
    Playlist {
        #[command(subcommand)]
        action: PlaylistCommands,
    },
}

impl Commands {
    /// The command that opens `view`. Runs when no subcommand is given.
    #[must_use]
    pub const fn for_view(view: View) -> Self {
        match view {
            View::Board => Self::Board,
            View::Timeline => Self::Timeline,
            View::History => Self::History(HistoryArgs { follow: false }),
            View::Videos => Self::Playlist {
                action: PlaylistCommands::List,
            },
        }
    }
}

/// Arguments for `cronos history`.
#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    /// Keep running and print new entries as they are recorded.
    #[arg(long)]
    pub follow: bool,
}
