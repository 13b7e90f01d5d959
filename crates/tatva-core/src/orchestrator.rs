//! Turn-level coordination of session state and the map.
//!
//! `SearchOrchestrator` is the only mutator of the [`SessionStore`]. Each
//! chat turn gets a [`TurnId`] from [`SearchOrchestrator::begin_turn`];
//! when the turn resolves, [`SearchOrchestrator::on_turn_completed`] turns a
//! complete, result-bearing response into a capsule, makes it active, and
//! re-renders the camera and boundary overlay from it.
//!
//! A response whose turn is not newer than the last capsule-producing turn
//! (or that began before the last `clear`) is stale and dropped.

use tatva_types::capsule::{SearchCapsule, TurnId};
use tatva_types::chat::ChatResponse;
use tatva_types::context::{SessionContext, Theme, ViewMode};
use tatva_types::error::{ChatError, MapError, SessionError};
use tatva_types::map::{OverlayHandle, OverlayShape, OverlayStyle};
use tatva_types::property::{Property, SearchZone};
use tracing::{debug, info, warn};

use crate::filter;
use crate::map::boundary::BoundaryPolicy;
use crate::map::capability::{MapCapability, SharedMap};
use crate::map::viewport::{FitOutcome, ViewportController};
use crate::session::label::derive_label;
use crate::session::store::SessionStore;

/// What the map ended up showing after a re-render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub viewport: FitOutcome,
    pub overlay: Option<(OverlayHandle, OverlayShape)>,
    /// Provider failures hit while rendering. They never roll back the store.
    pub errors: Vec<MapError>,
}

impl RenderReport {
    fn empty() -> Self {
        Self {
            viewport: FitOutcome::NoOp,
            overlay: None,
            errors: Vec::new(),
        }
    }
}

/// How a completed turn was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The backend call failed; `message` is suitable for the user.
    Failed { message: String },
    /// The response carried nothing usable.
    NoPayload,
    /// A newer turn already produced a capsule, or results were cleared.
    Stale { reply: String },
    /// Conversation only: incomplete, or complete without properties.
    Conversational { reply: String },
    CapsuleCreated {
        index: usize,
        reply: String,
        render: RenderReport,
    },
}

/// Coordinates the capsule store, the viewport, and the boundary overlay.
pub struct SearchOrchestrator<M: MapCapability> {
    store: SessionStore,
    map: SharedMap<M>,
    viewport: ViewportController<M>,
    boundary: BoundaryPolicy<M>,
    context: SessionContext,
    last_issued: u64,
    /// Turns at or below this id can no longer create capsules.
    watermark: u64,
}

impl<M: MapCapability> SearchOrchestrator<M> {
    pub fn new(map: M, padding: f64, context: SessionContext) -> Self {
        let map = SharedMap::new(map);
        let viewport = ViewportController::with_padding(map.clone(), padding);
        let boundary = BoundaryPolicy::new(map.clone(), OverlayStyle::for_theme(context.theme));
        Self {
            store: SessionStore::new(),
            map,
            viewport,
            boundary,
            context,
            last_issued: 0,
            watermark: 0,
        }
    }

    /// Reserve the id for a turn about to be sent.
    pub fn begin_turn(&mut self) -> TurnId {
        self.last_issued += 1;
        TurnId(self.last_issued)
    }

    /// Handle the resolution of `turn`. Never panics or propagates; every
    /// failure ends up in the returned outcome and the log.
    pub fn on_turn_completed(
        &mut self,
        turn: TurnId,
        result: Result<ChatResponse, ChatError>,
    ) -> TurnOutcome {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(turn_id = %turn, error = %e, "Chat turn failed, no capsule");
                return TurnOutcome::Failed {
                    message: format!("Sorry, I couldn't reach the search service ({e})."),
                };
            }
        };

        if !response.has_payload() {
            warn!(turn_id = %turn, "Chat response without usable payload");
            return TurnOutcome::NoPayload;
        }

        if !response.is_result_bearing() {
            debug!(turn_id = %turn, status = %response.status, "Conversational turn");
            return TurnOutcome::Conversational {
                reply: response.response,
            };
        }

        if turn.0 <= self.watermark || turn.0 > self.last_issued {
            warn!(
                turn_id = %turn,
                watermark = self.watermark,
                "Discarding out-of-order search result"
            );
            return TurnOutcome::Stale {
                reply: response.response,
            };
        }

        let reply = response.response.clone();
        let capsule = self.build_capsule(turn, response);
        let label = capsule.label().to_string();
        let index = self.store.append(capsule);
        self.watermark = turn.0;
        info!(turn_id = %turn, capsule_index = index, label = %label, "Search capsule created");

        let render = self.render_active();
        TurnOutcome::CapsuleCreated {
            index,
            reply,
            render,
        }
    }

    fn build_capsule(&self, turn: TurnId, response: ChatResponse) -> SearchCapsule {
        let properties: Vec<Property> = response
            .properties
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, mut p)| {
                if p.listing_id.is_none() {
                    p.listing_id = Some(format!("#{}", i + 1));
                }
                p
            })
            .collect();

        let zone = response
            .search_zone
            .as_ref()
            .and_then(|raw| match SearchZone::from_raw(raw) {
                Ok(zone) => Some(zone),
                Err(e) => {
                    warn!(turn_id = %turn, error = %e, "Ignoring invalid search zone");
                    None
                }
            });

        let snapshot = response.data.unwrap_or_default();
        let label = derive_label(&snapshot, self.store.len() + 1);

        SearchCapsule::new(
            turn,
            label,
            properties,
            response.family_hubs.unwrap_or_default(),
            zone,
            snapshot,
        )
    }

    /// Make an earlier capsule active and re-render the map from it.
    pub fn select(&mut self, index: usize) -> Result<RenderReport, SessionError> {
        self.store.select(index)?;
        info!(capsule_index = index, "Capsule selected");
        Ok(self.render_active())
    }

    /// Drop all capsules and the boundary overlay. The camera stays put.
    pub fn clear(&mut self) {
        self.store.clear();
        self.watermark = self.last_issued;
        if let Err(e) = self.boundary.teardown() {
            warn!(error = %e, "Failed to remove boundary while clearing results");
        }
        info!("Search results cleared");
    }

    /// Release everything drawn on the map.
    pub fn teardown(&mut self) -> Result<(), MapError> {
        self.boundary.teardown()
    }

    fn render_active(&mut self) -> RenderReport {
        let Some(capsule) = self.store.active() else {
            return RenderReport::empty();
        };

        let mut errors = Vec::new();
        let viewport = match self.viewport.fit(capsule.hubs(), capsule.properties()) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Viewport fit failed");
                errors.push(e);
                FitOutcome::NoOp
            }
        };

        if let Err(e) = self.boundary.render(capsule) {
            warn!(error = %e, "Boundary render failed");
            errors.push(e);
        }

        RenderReport {
            viewport,
            overlay: self.boundary.live().map(|(h, s)| (h, s.clone())),
            errors,
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.context.category = category.into();
    }

    /// Switch theme and redraw the boundary in the matching style.
    ///
    /// Only the overlay is redrawn; the camera stays where it is. Returns the
    /// restyled overlay, if the active capsule has one.
    pub fn set_theme(
        &mut self,
        theme: Theme,
    ) -> Result<Option<(OverlayHandle, OverlayShape)>, MapError> {
        self.context.theme = theme;
        self.boundary.set_style(OverlayStyle::for_theme(theme));
        let Some(capsule) = self.store.active() else {
            return Ok(None);
        };
        self.boundary.render(capsule)?;
        Ok(self.boundary.live().map(|(h, s)| (h, s.clone())))
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.context.view_mode = mode;
    }

    /// The active capsule's properties under the current category.
    pub fn visible_properties(&self) -> Vec<&Property> {
        match self.store.active() {
            Some(capsule) => filter::filter(capsule.properties(), &self.context.category),
            None => Vec::new(),
        }
    }

    /// Filter categories available in the active capsule.
    pub fn categories(&self) -> Vec<String> {
        self.store
            .active()
            .map(|c| filter::categories(c.properties()))
            .unwrap_or_else(|| filter::categories(&[]))
    }

    pub fn active(&self) -> Option<&SearchCapsule> {
        self.store.active()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.store.active_index()
    }

    pub fn capsules(&self) -> &[SearchCapsule] {
        self.store.capsules()
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Read-only access to the map provider.
    pub fn map(&self) -> &SharedMap<M> {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::capability::test_support::{MapCall, RecordingMap};
    use serde_json::json;
    use tatva_types::chat::TurnStatus;
    use tatva_types::geo::RawCoordinate;
    use tatva_types::property::{Hub, RawSearchZone};

    fn orchestrator() -> SearchOrchestrator<RecordingMap> {
        SearchOrchestrator::new(RecordingMap::default(), 80.0, SessionContext::default())
    }

    fn located(kind: &str, lat: f64, lng: f64) -> Property {
        Property {
            property_type: Some(kind.to_string()),
            latitude: Some(lat.into()),
            longitude: Some(lng.into()),
            ..Default::default()
        }
    }

    fn complete(properties: Vec<Property>) -> ChatResponse {
        ChatResponse {
            response: "Here are the top matches".to_string(),
            status: TurnStatus::Complete,
            properties: Some(properties),
            data: Some(json!({"size_bhk": 2, "location": "HSR Layout"}).into()),
            ..Default::default()
        }
    }

    fn zone() -> RawSearchZone {
        RawSearchZone::new(12.90, 12.95, 77.60, 77.68)
    }

    #[test]
    fn test_complete_turn_with_zone_creates_active_capsule_and_rectangle() {
        let mut orch = orchestrator();
        let mut response = complete(vec![
            located("Apartment", 12.91, 77.61),
            located("Villa", 12.92, 77.62),
            located("Independent Villa", 12.93, 77.63),
        ]);
        response.search_zone = Some(zone());

        let turn = orch.begin_turn();
        let outcome = orch.on_turn_completed(turn, Ok(response));

        let TurnOutcome::CapsuleCreated { index, render, .. } = outcome else {
            panic!("expected a capsule");
        };
        assert_eq!(index, 0);
        assert_eq!(orch.capsules().len(), 1);
        assert_eq!(orch.active_index(), Some(0));
        assert_eq!(orch.active().unwrap().label(), "2 BHK in HSR Layout");

        let (_, shape) = render.overlay.unwrap();
        let expected = SearchZone::from_raw(&zone()).unwrap();
        assert_eq!(shape, OverlayShape::Rectangle { bounds: *expected.bounds() });
        assert!(matches!(render.viewport, FitOutcome::Applied(_)));
        assert!(render.errors.is_empty());
    }

    #[test]
    fn test_incomplete_turn_creates_no_capsule() {
        let mut orch = orchestrator();
        let mut response = complete(vec![located("Villa", 12.9, 77.6)]);
        response.status = TurnStatus::Incomplete;

        let turn = orch.begin_turn();
        let outcome = orch.on_turn_completed(turn, Ok(response));
        assert!(matches!(outcome, TurnOutcome::Conversational { .. }));
        assert!(orch.capsules().is_empty());
        assert_eq!(orch.map().inspect(|m| m.calls.len()).unwrap(), 0);
    }

    #[test]
    fn test_complete_turn_without_properties_is_conversational() {
        let mut orch = orchestrator();
        let turn = orch.begin_turn();
        let outcome = orch.on_turn_completed(turn, Ok(complete(Vec::new())));
        assert!(matches!(outcome, TurnOutcome::Conversational { .. }));
        assert!(orch.active().is_none());
    }

    #[test]
    fn test_missing_payload_and_failures_leave_state_alone() {
        let mut orch = orchestrator();
        let turn = orch.begin_turn();
        orch.on_turn_completed(turn, Ok(complete(vec![located("Villa", 12.9, 77.6)])));
        let calls_before = orch.map().inspect(|m| m.calls.len()).unwrap();

        let turn = orch.begin_turn();
        let blank = ChatResponse::default();
        assert_eq!(orch.on_turn_completed(turn, Ok(blank)), TurnOutcome::NoPayload);

        let turn = orch.begin_turn();
        let failed = orch.on_turn_completed(
            turn,
            Err(ChatError::Transport("connection refused".to_string())),
        );
        assert!(matches!(failed, TurnOutcome::Failed { .. }));

        assert_eq!(orch.capsules().len(), 1);
        assert_eq!(orch.active_index(), Some(0));
        assert_eq!(orch.map().inspect(|m| m.calls.len()).unwrap(), calls_before);
    }

    #[test]
    fn test_stale_turn_does_not_steal_selection() {
        let mut orch = orchestrator();
        let slow = orch.begin_turn();
        let fast = orch.begin_turn();

        let outcome = orch.on_turn_completed(fast, Ok(complete(vec![located("Villa", 12.9, 77.6)])));
        assert!(matches!(outcome, TurnOutcome::CapsuleCreated { .. }));

        let outcome = orch.on_turn_completed(slow, Ok(complete(vec![located("Flat", 13.0, 77.7)])));
        assert!(matches!(outcome, TurnOutcome::Stale { .. }));
        assert_eq!(orch.capsules().len(), 1);
        assert_eq!(orch.active().unwrap().turn(), fast);
    }

    #[test]
    fn test_turn_begun_before_clear_is_stale() {
        let mut orch = orchestrator();
        let turn = orch.begin_turn();
        orch.clear();
        let outcome = orch.on_turn_completed(turn, Ok(complete(vec![located("Villa", 12.9, 77.6)])));
        assert!(matches!(outcome, TurnOutcome::Stale { .. }));
        assert!(orch.capsules().is_empty());
    }

    #[test]
    fn test_unissued_turn_is_rejected() {
        let mut orch = orchestrator();
        let outcome = orch.on_turn_completed(TurnId(42), Ok(complete(vec![located("Villa", 12.9, 77.6)])));
        assert!(matches!(outcome, TurnOutcome::Stale { .. }));
    }

    #[test]
    fn test_select_rerenders_and_swaps_overlay() {
        let mut orch = orchestrator();

        let mut first = complete(vec![located("Villa", 12.9, 77.6)]);
        first.family_hubs = Some(vec![
            Hub::new("Office", 12.95, 77.70),
            Hub::new("School", 12.92, 77.64),
            Hub::new("Parents", 12.97, 77.59),
        ]);
        let turn = orch.begin_turn();
        orch.on_turn_completed(turn, Ok(first));

        let mut second = complete(vec![located("Flat", 12.91, 77.61)]);
        second.search_zone = Some(zone());
        let turn = orch.begin_turn();
        orch.on_turn_completed(turn, Ok(second));
        assert_eq!(orch.active_index(), Some(1));

        let report = orch.select(0).unwrap();
        assert_eq!(orch.active_index(), Some(0));
        match report.overlay {
            Some((_, OverlayShape::Polygon { vertices })) => assert_eq!(vertices.len(), 3),
            other => panic!("expected polygon, got {other:?}"),
        }
        // Exactly one overlay on the map after all that.
        assert_eq!(orch.map().inspect(|m| m.live.len()).unwrap(), 1);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut orch = orchestrator();
        let turn = orch.begin_turn();
        orch.on_turn_completed(turn, Ok(complete(vec![located("Villa", 12.9, 77.6)])));

        let err = orch.select(5).unwrap_err();
        assert_eq!(err, SessionError::OutOfRange { index: 5, len: 1 });
        assert_eq!(orch.active_index(), Some(0));
    }

    #[test]
    fn test_clear_removes_overlay_but_keeps_camera() {
        let mut orch = orchestrator();
        let mut response = complete(vec![located("Villa", 12.9, 77.6)]);
        response.search_zone = Some(zone());
        let turn = orch.begin_turn();
        orch.on_turn_completed(turn, Ok(response));
        let camera = orch.map().inspect(|m| m.camera).unwrap();

        orch.clear();
        assert!(orch.capsules().is_empty());
        assert_eq!(orch.active_index(), None);
        assert_eq!(orch.map().inspect(|m| m.live.len()).unwrap(), 0);
        assert_eq!(orch.map().inspect(|m| m.camera).unwrap(), camera);
    }

    #[test]
    fn test_unlocatable_results_keep_camera() {
        let mut orch = orchestrator();
        let turn = orch.begin_turn();
        let outcome = orch.on_turn_completed(turn, Ok(complete(vec![Property::default()])));
        let TurnOutcome::CapsuleCreated { render, .. } = outcome else {
            panic!("expected capsule");
        };
        assert_eq!(render.viewport, FitOutcome::NoOp);
        assert!(render.overlay.is_none());
        // The unlocatable listing is still listed.
        assert_eq!(orch.visible_properties().len(), 1);
    }

    #[test]
    fn test_invalid_zone_falls_back_to_hubs() {
        let mut orch = orchestrator();
        let mut response = complete(vec![located("Villa", 12.9, 77.6)]);
        response.search_zone = Some(RawSearchZone {
            min_lat: Some(RawCoordinate::from(13.0)),
            max_lat: Some(RawCoordinate::from(12.0)),
            ..zone()
        });
        response.family_hubs = Some(vec![
            Hub::new("A", 12.90, 77.60),
            Hub::new("B", 12.95, 77.65),
            Hub::new("C", 12.92, 77.70),
        ]);
        let turn = orch.begin_turn();
        orch.on_turn_completed(turn, Ok(response));

        assert!(orch.active().unwrap().zone().is_none());
        let calls = orch.map().inspect(|m| m.calls.clone()).unwrap();
        assert!(calls.iter().any(|c| matches!(c, MapCall::Polygon(v) if v.len() == 3)));
    }

    #[test]
    fn test_string_zone_and_bad_listing_coordinate_still_build_capsule() {
        let response: ChatResponse = serde_json::from_value(json!({
            "response": "Found 2 homes",
            "status": "complete",
            "properties": [
                {"listing_id": 17, "property_type": "Villa", "latitude": true, "longitude": 77.6},
                {"property_type": "Apartment", "latitude": "12.93", "longitude": "77.64"}
            ],
            "search_zone": {"min_lat": "12.90", "max_lat": "12.95", "min_lng": "77.60", "max_lng": "77.68"}
        }))
        .unwrap();

        let mut orch = orchestrator();
        let turn = orch.begin_turn();
        let outcome = orch.on_turn_completed(turn, Ok(response));
        let TurnOutcome::CapsuleCreated { render, .. } = outcome else {
            panic!("expected a capsule, got {outcome:?}");
        };
        assert!(matches!(render.overlay, Some((_, OverlayShape::Rectangle { .. }))));
        assert!(render.errors.is_empty());

        let capsule = orch.active().unwrap();
        assert_eq!(capsule.properties().len(), 2);
        assert_eq!(capsule.properties()[0].listing_id.as_deref(), Some("17"));
        assert!(capsule.zone().is_some());
    }

    #[test]
    fn test_positional_ids_for_unnamed_listings() {
        let mut orch = orchestrator();
        let mut named = located("Villa", 12.9, 77.6);
        named.listing_id = Some("L-9".to_string());
        let turn = orch.begin_turn();
        orch.on_turn_completed(turn, Ok(complete(vec![named, located("Flat", 12.8, 77.5)])));

        let ids: Vec<_> = orch
            .active()
            .unwrap()
            .properties()
            .iter()
            .map(|p| p.listing_id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["L-9", "#2"]);
    }

    #[test]
    fn test_category_filter_on_active_capsule() {
        let mut orch = orchestrator();
        let turn = orch.begin_turn();
        orch.on_turn_completed(
            turn,
            Ok(complete(vec![
                located("Apartment", 12.91, 77.61),
                located("Villa", 12.92, 77.62),
                located("Independent Villa", 12.93, 77.63),
            ])),
        );

        orch.set_category("Villa");
        let kinds: Vec<_> = orch
            .visible_properties()
            .iter()
            .map(|p| p.property_type.clone().unwrap())
            .collect();
        assert_eq!(kinds, vec!["Villa", "Independent Villa"]);
        assert_eq!(orch.categories(), vec!["All", "Apartment", "Villa", "Independent Villa"]);

        orch.set_category("All");
        assert_eq!(orch.visible_properties().len(), 3);
    }

    #[test]
    fn test_theme_change_redraws_boundary() {
        let mut orch = orchestrator();
        assert_eq!(orch.set_theme(Theme::Dark), Ok(None));

        let mut response = complete(vec![located("Villa", 12.9, 77.6)]);
        response.search_zone = Some(zone());
        let turn = orch.begin_turn();
        orch.on_turn_completed(turn, Ok(response));
        let fits_before = orch
            .map()
            .inspect(|m| m.calls.iter().filter(|c| matches!(c, MapCall::Fit(..))).count())
            .unwrap();

        let overlay = orch.set_theme(Theme::Light).unwrap();
        assert!(matches!(overlay, Some((_, OverlayShape::Rectangle { .. }))));
        assert_eq!(orch.context().theme, Theme::Light);
        assert_eq!(orch.map().inspect(|m| m.live.len()).unwrap(), 1);
        assert_eq!(orch.map().inspect(|m| m.removes()).unwrap(), 1);

        // Restyling never moves the camera.
        let fits_after = orch
            .map()
            .inspect(|m| m.calls.iter().filter(|c| matches!(c, MapCall::Fit(..))).count())
            .unwrap();
        assert_eq!(fits_before, 1);
        assert_eq!(fits_after, fits_before);
    }

    #[test]
    fn test_teardown_releases_overlay() {
        let mut orch = orchestrator();
        let mut response = complete(vec![located("Villa", 12.9, 77.6)]);
        response.search_zone = Some(zone());
        let turn = orch.begin_turn();
        orch.on_turn_completed(turn, Ok(response));

        orch.teardown().unwrap();
        assert_eq!(orch.map().inspect(|m| m.live.len()).unwrap(), 0);
        // Capsules survive a teardown of the map layer.
        assert_eq!(orch.capsules().len(), 1);
    }
}
