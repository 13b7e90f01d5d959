//! Boundary overlay selection and drawing.
//!
//! Shape precedence, evaluated fresh for every active capsule:
//! 1. an explicit search zone draws a rectangle over its bounds;
//! 2. otherwise three or more locatable hubs draw a polygon through the hub
//!    points in the order the backend supplied them;
//! 3. otherwise nothing is drawn.
//!
//! The polygon is not hull-sorted, so unusual hub orders can produce a
//! self-intersecting outline.

use tatva_types::capsule::SearchCapsule;
use tatva_types::error::MapError;
use tatva_types::geo::GeoPoint;
use tatva_types::map::{OverlayHandle, OverlayShape, OverlayStyle};
use tracing::{debug, info};

use super::capability::{MapCapability, SharedMap};
use super::overlay::OverlayGuard;

/// Fewest hub vertices that enclose an area.
pub const MIN_POLYGON_HUBS: usize = 3;

/// The overlay a capsule should show, if any.
pub fn select_shape(capsule: &SearchCapsule) -> Option<OverlayShape> {
    if let Some(zone) = capsule.zone() {
        return Some(OverlayShape::Rectangle {
            bounds: *zone.bounds(),
        });
    }

    let vertices: Vec<GeoPoint> = capsule
        .hubs()
        .iter()
        .filter_map(|hub| match hub.point() {
            Ok(p) => Some(p),
            Err(e) => {
                debug!(hub = %hub.label, error = %e, "Hub left out of boundary polygon");
                None
            }
        })
        .collect();

    if vertices.len() >= MIN_POLYGON_HUBS {
        Some(OverlayShape::Polygon { vertices })
    } else {
        None
    }
}

/// Keeps at most one boundary overlay alive on the map.
///
/// Drawing a new overlay always releases the previous one first; dropping
/// the policy releases whatever is still live.
pub struct BoundaryPolicy<M: MapCapability> {
    map: SharedMap<M>,
    style: OverlayStyle,
    live: Option<OverlayGuard<M>>,
}

impl<M: MapCapability> BoundaryPolicy<M> {
    pub fn new(map: SharedMap<M>, style: OverlayStyle) -> Self {
        Self {
            map,
            style,
            live: None,
        }
    }

    /// Style used for the next overlay drawn.
    pub fn set_style(&mut self, style: OverlayStyle) {
        self.style = style;
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// The overlay currently on the map.
    pub fn live(&self) -> Option<(OverlayHandle, &OverlayShape)> {
        self.live.as_ref().map(|g| (g.handle(), g.shape()))
    }

    /// Replace the current overlay with the one `capsule` calls for.
    ///
    /// The previous overlay is released before anything is drawn. If that
    /// release fails, nothing new is drawn and the error is returned.
    pub fn render(&mut self, capsule: &SearchCapsule) -> Result<Option<OverlayHandle>, MapError> {
        self.teardown()?;

        let Some(shape) = select_shape(capsule) else {
            debug!(capsule = capsule.label(), "No boundary for capsule");
            return Ok(None);
        };

        let style = &self.style;
        let handle = self.map.with(|m| match &shape {
            OverlayShape::Rectangle { bounds } => m.draw_rectangle(bounds, style),
            OverlayShape::Polygon { vertices } => m.draw_polygon(vertices, style),
        })?;

        info!(
            overlay = %handle,
            kind = shape.kind(),
            capsule = capsule.label(),
            "Boundary drawn"
        );
        self.live = Some(OverlayGuard::new(self.map.clone(), handle, shape));
        Ok(Some(handle))
    }

    /// Remove the live overlay, if any.
    pub fn teardown(&mut self) -> Result<(), MapError> {
        match self.live.take() {
            Some(guard) => guard.release(),
            None => Ok(()),
        }
    }
}
