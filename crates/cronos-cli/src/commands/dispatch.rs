use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Task { action } => commands::task::handle(&action, ctx, flags).await,
        Commands::Board => commands::board::handle(ctx, flags).await,
        Commands::Timeline => commands::timeline::handle(ctx, flags).await,
        Commands::History(args) => commands::history::handle(&args, ctx, flags).await,
        Commands::Playlist { action } => commands::playlist::handle(&action, ctx, flags).await,
        Commands::Auth { .. } => anyhow::bail!("auth commands run before a session is opened"),
    }
}
