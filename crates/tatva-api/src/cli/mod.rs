//! CLI command definitions for the `tatva` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod config;
pub mod session;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Conversational rental search with a live map.
#[derive(Parser)]
#[command(name = "tatva", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive search session.
    Chat {
        /// User id sent to the backend (overrides config.toml).
        #[arg(long, env = "TATVA_USER")]
        user: Option<String>,

        /// Chat backend base URL (overrides config.toml).
        #[arg(long, env = "TATVA_BACKEND_URL")]
        backend: Option<String>,
    },

    /// Send a single message and print the result.
    Ask {
        /// The message to send.
        message: String,

        #[arg(long, env = "TATVA_USER")]
        user: Option<String>,

        #[arg(long, env = "TATVA_BACKEND_URL")]
        backend: Option<String>,
    },

    /// Show the resolved configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
