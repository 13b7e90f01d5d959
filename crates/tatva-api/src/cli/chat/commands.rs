//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and drive the search session: browsing earlier
//! results, filtering, switching theme or view, and dumping the map scene.

use console::style;
use tatva_types::context::{Theme, ViewMode};

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// List every search capsule in this session.
    Results,
    /// Make an earlier capsule active (0-based index).
    Select(usize),
    /// Filter the active listings by property type.
    Filter(String),
    /// Show the property types in the active capsule.
    Categories,
    /// Print the current map scene as GeoJSON.
    Map,
    Theme(Theme),
    View(ViewMode),
    /// Drop all search results.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Unknown or malformed command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`. `/select` takes the
/// 1-based number shown by `/results`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/results" | "/r" => ChatCommand::Results,
        "/select" | "/s" => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => ChatCommand::Select(n - 1),
            _ => ChatCommand::Unknown("/select requires a result number (1, 2, ...)".to_string()),
        },
        "/filter" | "/f" => {
            if arg.is_empty() {
                ChatCommand::Unknown("/filter requires a category (or All)".to_string())
            } else {
                ChatCommand::Filter(arg.to_string())
            }
        }
        "/categories" => ChatCommand::Categories,
        "/map" => ChatCommand::Map,
        "/theme" => match arg.parse() {
            Ok(theme) => ChatCommand::Theme(theme),
            Err(e) => ChatCommand::Unknown(format!("/theme: {e} (light or dark)")),
        },
        "/view" => match arg.parse() {
            Ok(mode) => ChatCommand::View(mode),
            Err(e) => ChatCommand::Unknown(format!("/view: {e} (split, list or map)")),
        },
        "/clear" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Show this help message"),
        ("/results", "List searches from this session"),
        ("/select <n>", "Show search number n again"),
        ("/filter <type>", "Only show one property type (All to reset)"),
        ("/categories", "List property types in the current results"),
        ("/map", "Print the map scene as GeoJSON"),
        ("/theme <light|dark>", "Switch the boundary style"),
        ("/view <split|list|map>", "Choose which panels to show"),
        ("/clear", "Forget all search results"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, help) in rows {
        println!("  {:<24} {}", style(cmd).cyan(), help);
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
