//! Camera and overlay descriptions shared by the map controllers and the
//! mapping providers that draw them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::Theme;
use crate::geo::{GeoBox, GeoPoint};

/// Camera bounds plus the padding the provider keeps around them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub bounds: GeoBox,
    pub padding: f64,
}

/// Opaque token for an overlay drawn by a mapping provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayHandle(pub u64);

impl fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// The boundary shape chosen for a capsule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayShape {
    /// Explicit search zone from the backend.
    Rectangle { bounds: GeoBox },
    /// Hub points joined in the order the backend supplied them.
    Polygon { vertices: Vec<GeoPoint> },
}

impl OverlayShape {
    pub fn kind(&self) -> &'static str {
        match self {
            OverlayShape::Rectangle { .. } => "rectangle",
            OverlayShape::Polygon { .. } => "polygon",
        }
    }
}

/// Stroke and fill for boundary overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub stroke_color: String,
    pub stroke_opacity: f32,
    pub stroke_weight: f32,
    pub fill_color: String,
    pub fill_opacity: f32,
}

const EMERALD: &str = "#10b981";

impl OverlayStyle {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::default(),
            Theme::Dark => Self {
                stroke_opacity: 0.9,
                fill_opacity: 0.30,
                ..Self::default()
            },
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stroke_color: EMERALD.to_string(),
            stroke_opacity: 0.8,
            stroke_weight: 2.0,
            fill_color: EMERALD.to_string(),
            fill_opacity: 0.20,
        }
    }
}
