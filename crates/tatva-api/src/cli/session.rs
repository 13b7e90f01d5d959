//! Search session wiring shared by `chat` and `ask`.

use tatva_core::chat::backend::ChatBackend;
use tatva_core::chat::service::ChatService;
use tatva_core::orchestrator::{RenderReport, SearchOrchestrator, TurnOutcome};
use tatva_infra::map::SceneMap;
use tatva_observe::search_attrs::{
    MAP_OVERLAY_KIND, SEARCH_BACKEND, SEARCH_CAPSULE_INDEX, SEARCH_RESULT_COUNT, SEARCH_TURN_ID,
    SEARCH_TURN_STATUS, SPAN_CAPSULE_SELECT, SPAN_SEARCH_TURN,
};
use tatva_types::config::GlobalConfig;
use tatva_types::context::SessionContext;
use tatva_types::error::SessionError;
use tracing::Instrument;
use tracing::field::{Empty, display};

pub type SceneOrchestrator = SearchOrchestrator<SceneMap>;

/// A fresh session drawing on a headless scene configured from `config`.
pub fn new_orchestrator(config: &GlobalConfig) -> SceneOrchestrator {
    SearchOrchestrator::new(
        SceneMap::new(&config.map),
        config.map.effective_padding(),
        SessionContext::new(config.theme),
    )
}

/// Send `message` as a new turn and fold the result into the session.
pub async fn run_turn<B: ChatBackend>(
    service: &ChatService<B>,
    orchestrator: &mut SceneOrchestrator,
    message: &str,
) -> TurnOutcome {
    let turn = orchestrator.begin_turn();
    let span = tracing::info_span!(
        SPAN_SEARCH_TURN,
        "search.turn_id" = Empty,
        "search.backend" = Empty,
        "search.turn.status" = Empty,
        "search.result.count" = Empty,
        "search.capsule.index" = Empty,
        "map.overlay.kind" = Empty,
    );

    span.record(SEARCH_TURN_ID, turn.0);
    span.record(SEARCH_BACKEND, service.backend().name());

    let result = service.ask(message).instrument(span.clone()).await;
    if let Ok(response) = &result {
        span.record(SEARCH_TURN_STATUS, display(&response.status));
        span.record(
            SEARCH_RESULT_COUNT,
            response.properties.as_ref().map_or(0, Vec::len) as u64,
        );
    }

    let outcome = span.in_scope(|| orchestrator.on_turn_completed(turn, result));
    if let TurnOutcome::CapsuleCreated { index, render, .. } = &outcome {
        span.record(SEARCH_CAPSULE_INDEX, *index as u64);
        if let Some((_, shape)) = &render.overlay {
            span.record(MAP_OVERLAY_KIND, shape.kind());
        }
    }
    outcome
}

/// Select a capsule by its 0-based store index under a select span.
pub fn select_capsule(
    orchestrator: &mut SceneOrchestrator,
    index: usize,
) -> Result<RenderReport, SessionError> {
    let span = tracing::info_span!(
        SPAN_CAPSULE_SELECT,
        "search.capsule.index" = index as u64,
        "map.overlay.kind" = Empty,
    );
    let _entered = span.enter();
    let report = orchestrator.select(index)?;
    if let Some((_, shape)) = &report.overlay {
        span.record(MAP_OVERLAY_KIND, shape.kind());
    }
    Ok(report)
}
