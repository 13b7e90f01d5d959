//! SceneMap -- headless [`MapCapability`] provider.
//!
//! Keeps the camera and the live overlays in memory and renders them, plus
//! the hub and listing markers, as a GeoJSON `FeatureCollection` that any
//! web map can load.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use tatva_core::map::capability::MapCapability;
use tatva_types::config::MapConfig;
use tatva_types::error::MapError;
use tatva_types::geo::{GeoBox, GeoPoint};
use tatva_types::map::{OverlayHandle, OverlayShape, OverlayStyle, Viewport};
use tatva_types::property::{Hub, Property};
use tracing::{debug, trace};

/// In-memory map scene.
#[derive(Debug, Clone)]
pub struct SceneMap {
    default_center: GeoPoint,
    default_zoom: u8,
    camera: Option<Viewport>,
    overlays: BTreeMap<OverlayHandle, (OverlayShape, OverlayStyle)>,
    next_handle: u64,
    draw_count: u64,
    remove_count: u64,
}

impl SceneMap {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            default_center: config.default_center,
            default_zoom: config.default_zoom,
            camera: None,
            overlays: BTreeMap::new(),
            next_handle: 0,
            draw_count: 0,
            remove_count: 0,
        }
    }

    /// Camera set by the last fit, if any.
    pub fn camera(&self) -> Option<&Viewport> {
        self.camera.as_ref()
    }

    /// Where the camera looks: the fitted bounds' center, else the default.
    pub fn camera_center(&self) -> GeoPoint {
        self.camera
            .map(|v| v.bounds.center())
            .unwrap_or(self.default_center)
    }

    pub fn default_zoom(&self) -> u8 {
        self.default_zoom
    }

    pub fn overlays(&self) -> impl Iterator<Item = (OverlayHandle, &OverlayShape, &OverlayStyle)> {
        self.overlays
            .iter()
            .map(|(handle, (shape, style))| (*handle, shape, style))
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Total overlays ever drawn and removed.
    pub fn lifetime_counts(&self) -> (u64, u64) {
        (self.draw_count, self.remove_count)
    }

    /// The scene as a GeoJSON `FeatureCollection`.
    ///
    /// Features, in order: the camera box (when fitted), each live overlay,
    /// each locatable hub, each locatable listing. Entries with invalid
    /// coordinates are skipped.
    pub fn to_geojson(&self, hubs: &[Hub], properties: &[Property]) -> Value {
        let mut features = Vec::new();

        if let Some(viewport) = &self.camera {
            features.push(json!({
                "type": "Feature",
                "geometry": polygon_geometry(&viewport.bounds.corners()),
                "properties": {
                    "role": "viewport",
                    "padding": viewport.padding,
                },
            }));
        }

        for (handle, (shape, style)) in &self.overlays {
            let geometry = match shape {
                OverlayShape::Rectangle { bounds } => polygon_geometry(&bounds.corners()),
                OverlayShape::Polygon { vertices } => polygon_geometry(vertices),
            };
            features.push(json!({
                "type": "Feature",
                "geometry": geometry,
                "properties": {
                    "role": "boundary",
                    "overlay": handle.0,
                    "shape": shape.kind(),
                    "stroke": style.stroke_color,
                    "stroke-opacity": style.stroke_opacity,
                    "stroke-width": style.stroke_weight,
                    "fill": style.fill_color,
                    "fill-opacity": style.fill_opacity,
                },
            }));
        }

        for hub in hubs {
            if let Ok(point) = hub.point() {
                features.push(json!({
                    "type": "Feature",
                    "geometry": point_geometry(point),
                    "properties": { "role": "hub", "label": hub.label },
                }));
            }
        }

        for property in properties {
            if let Ok(point) = property.point() {
                features.push(json!({
                    "type": "Feature",
                    "geometry": point_geometry(point),
                    "properties": {
                        "role": "listing",
                        "name": property.display_name(),
                        "type": property.property_type,
                        "rent": property.rent_price_inr_per_month,
                    },
                }));
            }
        }

        json!({ "type": "FeatureCollection", "features": features })
    }

    fn issue(&mut self, shape: OverlayShape, style: &OverlayStyle) -> OverlayHandle {
        self.next_handle += 1;
        self.draw_count += 1;
        let handle = OverlayHandle(self.next_handle);
        trace!(overlay = %handle, kind = shape.kind(), "Overlay drawn");
        self.overlays.insert(handle, (shape, style.clone()));
        handle
    }
}

impl Default for SceneMap {
    fn default() -> Self {
        Self::new(&MapConfig::default())
    }
}

impl MapCapability for SceneMap {
    fn fit_viewport(&mut self, bounds: &GeoBox, padding: f64) -> Result<(), MapError> {
        if !padding.is_finite() || padding < 0.0 {
            return Err(MapError::Provider(format!("invalid padding {padding}")));
        }
        debug!(
            south = bounds.south,
            west = bounds.west,
            north = bounds.north,
            east = bounds.east,
            padding,
            "Camera fitted"
        );
        self.camera = Some(Viewport {
            bounds: *bounds,
            padding,
        });
        Ok(())
    }

    fn draw_rectangle(
        &mut self,
        bounds: &GeoBox,
        style: &OverlayStyle,
    ) -> Result<OverlayHandle, MapError> {
        Ok(self.issue(OverlayShape::Rectangle { bounds: *bounds }, style))
    }

    fn draw_polygon(
        &mut self,
        vertices: &[GeoPoint],
        style: &OverlayStyle,
    ) -> Result<OverlayHandle, MapError> {
        if vertices.len() < 3 {
            return Err(MapError::Provider(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        Ok(self.issue(
            OverlayShape::Polygon {
                vertices: vertices.to_vec(),
            },
            style,
        ))
    }

    fn remove_overlay(&mut self, handle: OverlayHandle) -> Result<(), MapError> {
        self.overlays
            .remove(&handle)
            .ok_or(MapError::UnknownOverlay(handle.0))?;
        self.remove_count += 1;
        trace!(overlay = %handle, "Overlay removed");
        Ok(())
    }
}

/// GeoJSON positions are `[lng, lat]`.
fn position(point: &GeoPoint) -> Value {
    json!([point.lng, point.lat])
}

fn point_geometry(point: GeoPoint) -> Value {
    json!({ "type": "Point", "coordinates": position(&point) })
}

/// Closed linear ring through `vertices`.
fn polygon_geometry(vertices: &[GeoPoint]) -> Value {
    let mut ring: Vec<Value> = vertices.iter().map(position).collect();
    if let Some(first) = vertices.first() {
        ring.push(position(first));
    }
    json!({ "type": "Polygon", "coordinates": [ring] })
}
