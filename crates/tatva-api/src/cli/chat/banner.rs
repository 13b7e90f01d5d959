//! Welcome banner display for chat sessions.

use console::style;
use tatva_types::context::SessionContext;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(backend_url: &str, user_id: &str, context: &SessionContext) {
    println!();
    println!("  {} {}", style("◆").green(), style("Tatva").cyan().bold());
    println!("  {}", style("Tell me what kind of home you're looking for.").dim());
    println!();
    println!("  {}  {}", style("Backend:").bold(), style(backend_url).dim());
    println!("  {}     {}", style("User:").bold(), style(user_id).dim());
    println!(
        "  {}     {} theme, {} view",
        style("View:").bold(),
        context.theme,
        context.view_mode
    );
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
