#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;
use cronos_auth::LocalAuth;
use cronos_board::{Screen, SessionGate};
use cronos_config::CronosConfig;

mod cli;
mod commands;
mod context;
mod output;
mod ui;

const LANDING: &str = "\
Cronos
Enterprise Task Management Reimagined

Organize, prioritize, and collaborate from one board.

Get started:  cronos auth login --user <id>";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("cronos error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = CronosConfig::load_with_dotenv()
        .map_err(|error| anyhow::anyhow!("failed to load cronos configuration: {error}"))?;
    let auth = LocalAuth::from_config(&config.auth)?;

    if let Some(cli::Commands::Auth { action }) = &cli.command {
        return commands::auth::handle(action, &auth, &flags).await;
    }

    let session = match SessionGate::resolve(&auth).await {
        Screen::Workspace(session) => session,
        Screen::Loading | Screen::Landing => {
            println!("{LANDING}");
            return Ok(());
        }
    };

    let command = match cli.command {
        Some(command) => command,
        None => {
            let view = config.general.default_view;
            if flags.format == cli::OutputFormat::Table && !flags.quiet {
                println!("{}\n{}\n", view.title(), view.subtitle());
            }
            cli::Commands::for_view(view)
        }
    };

    let mut ctx = context::AppContext::init(config, session)
        .await
        .context("failed to initialize cronos application context")?;

    let result = commands::dispatch::dispatch(command, &mut ctx, &flags).await;
    ctx.flush_notices(&flags);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CRONOS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
