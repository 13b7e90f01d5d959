//! Span attribute names for search-session instrumentation.
//!
//! Shared by the CLI and any future front end so traces from different
//! surfaces line up. All constants are string slices usable as
//! `tracing::span!` field names.

/// Monotonic id of the chat turn within a session.
pub const SEARCH_TURN_ID: &str = "search.turn_id";

/// Backend that served the turn (e.g., "http").
pub const SEARCH_BACKEND: &str = "search.backend";

/// `complete` or `incomplete`.
pub const SEARCH_TURN_STATUS: &str = "search.turn.status";

/// Number of listings returned in the turn.
pub const SEARCH_RESULT_COUNT: &str = "search.result.count";

/// Store index of the capsule a turn created or selected.
pub const SEARCH_CAPSULE_INDEX: &str = "search.capsule.index";

/// Boundary overlay kind drawn for the active capsule.
pub const MAP_OVERLAY_KIND: &str = "map.overlay.kind";

// --- Span names ---

/// One user message through to its rendered outcome.
pub const SPAN_SEARCH_TURN: &str = "search_turn";

/// Re-render after the user picks an earlier capsule.
pub const SPAN_CAPSULE_SELECT: &str = "capsule_select";
