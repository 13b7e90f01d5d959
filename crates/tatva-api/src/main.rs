//! Tatva CLI entry point.
//!
//! Binary name: `tatva`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tatva_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = filter_for_verbosity(cli.verbose, cli.quiet);
    if let Err(e) = init_tracing(filter, cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "tatva", &mut std::io::stdout());
        return Ok(());
    }

    match cli.command {
        Commands::Chat { user, backend } => {
            let state = AppState::init(backend.as_deref(), user.as_deref()).await?;
            cli::chat::loop_runner::run_chat_loop(&state).await?;
        }

        Commands::Ask {
            message,
            user,
            backend,
        } => {
            let state = AppState::init(backend.as_deref(), user.as_deref()).await?;
            cli::ask::ask(&state, &message, cli.json).await?;
        }

        Commands::Config => {
            let state = AppState::init(None, None).await?;
            cli::config::show_config(&state, cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
