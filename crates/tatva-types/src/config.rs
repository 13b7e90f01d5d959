//! Global configuration types for Tatva.
//!
//! `GlobalConfig` represents the top-level `config.toml` that points the
//! client at a chat backend and tunes the map behaviour.

use serde::{Deserialize, Serialize};

use crate::context::Theme;
use crate::geo::GeoPoint;

/// Padding, in screen distance units, kept around fitted camera bounds.
pub const DEFAULT_VIEWPORT_PADDING: f64 = 80.0;

/// Top-level configuration.
///
/// Loaded from `~/.tatva/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Base URL of the chat backend (the `/chat` path is appended).
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// User identifier sent with every chat request.
    #[serde(default = "default_user_id")]
    pub user_id: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub map: MapConfig,
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_id() -> String {
    "guest".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            user_id: default_user_id(),
            request_timeout_secs: default_request_timeout_secs(),
            theme: Theme::default(),
            map: MapConfig::default(),
        }
    }
}

/// Camera settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_viewport_padding")]
    pub viewport_padding: f64,

    /// Where the camera sits before any search has been fitted.
    #[serde(default = "default_center")]
    pub default_center: GeoPoint,

    #[serde(default = "default_zoom")]
    pub default_zoom: u8,
}

fn default_viewport_padding() -> f64 {
    DEFAULT_VIEWPORT_PADDING
}

fn default_center() -> GeoPoint {
    // Bengaluru
    GeoPoint {
        lat: 12.9716,
        lng: 77.5946,
    }
}

fn default_zoom() -> u8 {
    12
}

impl MapConfig {
    /// Configured padding clamped to a usable value.
    pub fn effective_padding(&self) -> f64 {
        if self.viewport_padding.is_finite() && self.viewport_padding >= 0.0 {
            self.viewport_padding
        } else {
            DEFAULT_VIEWPORT_PADDING
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            viewport_padding: default_viewport_padding(),
            default_center: default_center(),
            default_zoom: default_zoom(),
        }
    }
}
