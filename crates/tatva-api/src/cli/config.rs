//! `tatva config`: print the resolved configuration.

use anyhow::Result;
use console::style;

use crate::state::AppState;

pub fn show_config(state: &AppState, json: bool) -> Result<()> {
    let config = &state.config;

    if json {
        let value = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!("  {} Tatva v{}", style("◆").green(), env!("CARGO_PKG_VERSION"));
    println!();
    println!("  {}", style("── Backend ──").dim());
    println!("  URL:      {}", style(&config.backend_url).cyan());
    println!("  User:     {}", config.user_id);
    println!("  Timeout:  {}s", config.request_timeout_secs);
    println!();
    println!("  {}", style("── Map ──").dim());
    println!("  Padding:  {}", config.map.effective_padding());
    println!(
        "  Center:   {} (zoom {})",
        config.map.default_center, config.map.default_zoom
    );
    println!("  Theme:    {}", config.theme);
    println!();
    println!(
        "  {}",
        style(format!("Data dir: {}", state.data_dir.display())).dim()
    );
    println!();

    Ok(())
}
