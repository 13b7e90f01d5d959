//! One-shot search: `tatva ask <message>`.

use anyhow::Result;
use console::style;
use serde_json::json;
use tatva_core::orchestrator::TurnOutcome;

use crate::cli::chat::renderer;
use crate::cli::session::{new_orchestrator, run_turn};
use crate::state::AppState;

/// Send one message and print the reply, plus listings and map when the
/// turn produced results.
pub async fn ask(state: &AppState, message: &str, json: bool) -> Result<()> {
    let mut orchestrator = new_orchestrator(&state.config);
    let outcome = run_turn(state.chat_service.as_ref(), &mut orchestrator, message).await;

    if json {
        let value = match &outcome {
            TurnOutcome::Failed { message } => json!({ "outcome": "failed", "error": message }),
            TurnOutcome::NoPayload => json!({ "outcome": "no_payload" }),
            TurnOutcome::Stale { reply } => json!({ "outcome": "stale", "reply": reply }),
            TurnOutcome::Conversational { reply } => {
                json!({ "outcome": "conversational", "reply": reply })
            }
            TurnOutcome::CapsuleCreated { reply, render, .. } => {
                let map = orchestrator.map().inspect(|scene| {
                    orchestrator
                        .active()
                        .map(|c| scene.to_geojson(c.hubs(), c.properties()))
                })?;
                json!({
                    "outcome": "capsule_created",
                    "reply": reply,
                    "capsule": orchestrator.active(),
                    "render": renderer::render_json(render),
                    "map": map,
                })
            }
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        renderer::print_outcome(&outcome);
        if let TurnOutcome::CapsuleCreated { render, .. } = &outcome {
            if let Some(capsule) = orchestrator.active() {
                println!("  {}\n", style(capsule.label()).cyan().bold());
            }
            renderer::print_properties(&orchestrator.visible_properties(), &orchestrator.context().category);
            renderer::print_render(render);
        }
    }

    orchestrator.teardown()?;

    if let TurnOutcome::Failed { message } = outcome {
        anyhow::bail!(message);
    }
    Ok(())
}
