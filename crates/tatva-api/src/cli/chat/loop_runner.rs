//! Main chat loop.
//!
//! Reads a line, either runs a slash command against the session or sends
//! it to the backend as a new turn, then prints whatever changed.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tatva_core::orchestrator::TurnOutcome;
use tracing::{info, warn};

use crate::cli::session::{SceneOrchestrator, new_orchestrator, run_turn, select_capsule};
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent, prompt_for};
use super::renderer;

fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message("Tatva is scanning listings…");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Listings and map summary for the active capsule, as the view mode allows.
fn show_active(orchestrator: &SceneOrchestrator, report: Option<&tatva_core::orchestrator::RenderReport>) {
    let view = orchestrator.context().view_mode;
    if view.shows_list() {
        let visible = orchestrator.visible_properties();
        renderer::print_properties(&visible, &orchestrator.context().category);
    }
    if view.shows_map() {
        if let Some(report) = report {
            renderer::print_render(report);
        }
    }
}

/// Run the interactive search loop until the user exits.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let mut orchestrator = new_orchestrator(&state.config);

    print_welcome_banner(
        &state.config.backend_url,
        state.chat_service.user_id(),
        orchestrator.context(),
    );

    let (mut chat_input, _writer) = ChatInput::new(prompt_for(None, 0))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        chat_input.set_prompt(prompt_for(
            orchestrator.active_index(),
            orchestrator.capsules().len(),
        ));

        let text = match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep searching.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Exit => break,
                ChatCommand::Results => {
                    if orchestrator.capsules().is_empty() {
                        println!("\n  {} No searches yet.\n", style("i").blue().bold());
                    } else {
                        let table = renderer::capsule_table(
                            orchestrator.capsules(),
                            orchestrator.active_index(),
                        );
                        println!("\n{table}\n");
                    }
                }
                ChatCommand::Select(index) => match select_capsule(&mut orchestrator, index) {
                    Ok(report) => {
                        if let Some(capsule) = orchestrator.active() {
                            println!("\n  {} {}\n", style("▶").green(), style(capsule.label()).cyan().bold());
                        }
                        show_active(&orchestrator, Some(&report));
                    }
                    Err(e) => println!("\n  {} {e}\n", style("!").yellow().bold()),
                },
                ChatCommand::Filter(category) => {
                    orchestrator.set_category(category);
                    println!();
                    show_active(&orchestrator, None);
                }
                ChatCommand::Categories => {
                    println!("\n  {}\n", orchestrator.categories().join(", "));
                }
                ChatCommand::Map => {
                    let geojson = orchestrator.map().inspect(|scene| match orchestrator.active() {
                        Some(capsule) => scene.to_geojson(capsule.hubs(), capsule.properties()),
                        None => scene.to_geojson(&[], &[]),
                    });
                    match geojson {
                        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                        Err(e) => println!("\n  {} {e}\n", style("!").red().bold()),
                    }
                }
                ChatCommand::Theme(theme) => match orchestrator.set_theme(theme) {
                    Ok(overlay) => {
                        println!("\n  {} theme\n", style(theme).bold());
                        if orchestrator.context().view_mode.shows_map() {
                            renderer::print_boundary(overlay.as_ref());
                            println!();
                        }
                    }
                    Err(e) => println!("\n  {} Boundary redraw failed: {e}\n", style("!").red().bold()),
                },
                ChatCommand::View(mode) => {
                    orchestrator.set_view_mode(mode);
                    println!("\n  {} view\n", style(mode).bold());
                }
                ChatCommand::Clear => {
                    orchestrator.clear();
                    println!("\n  {} Results cleared.\n", style("*").cyan().bold());
                }
                ChatCommand::Unknown(message) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(message).dim()
                    );
                }
            }
            continue;
        }

        let spinner = spinner();
        let outcome = run_turn(state.chat_service.as_ref(), &mut orchestrator, &text).await;
        spinner.finish_and_clear();

        renderer::print_outcome(&outcome);
        if let TurnOutcome::CapsuleCreated { render, .. } = &outcome {
            show_active(&orchestrator, Some(render));
        }
    }

    chat_input.flush();
    println!("\n  {}", style("Session ended.").dim());

    info!(capsules = orchestrator.capsules().len(), "Chat session ended");
    if let Err(e) = orchestrator.teardown() {
        warn!(error = %e, "Failed to release map overlays");
    }
    Ok(())
}
