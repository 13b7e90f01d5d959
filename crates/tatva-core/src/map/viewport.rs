//! Camera fitting for the active capsule.

use tatva_types::config::DEFAULT_VIEWPORT_PADDING;
use tatva_types::error::MapError;
use tatva_types::geo::GeoPoint;
use tatva_types::map::Viewport;
use tatva_types::property::{Hub, Property};
use tracing::{debug, info};

use super::capability::{MapCapability, SharedMap};

/// Result of a fit request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    /// The camera was moved to this viewport.
    Applied(Viewport),
    /// Nothing locatable; the camera was left where it was.
    NoOp,
}

impl FitOutcome {
    pub fn viewport(&self) -> Option<&Viewport> {
        match self {
            FitOutcome::Applied(v) => Some(v),
            FitOutcome::NoOp => None,
        }
    }
}

/// Every valid point among `hubs` followed by every valid property point.
///
/// Entries with missing or malformed coordinates are skipped.
pub fn locatable_points(hubs: &[Hub], properties: &[Property]) -> Vec<GeoPoint> {
    let hub_points = hubs.iter().filter_map(|hub| match hub.point() {
        Ok(p) => Some(p),
        Err(e) => {
            debug!(hub = %hub.label, error = %e, "Skipping hub without usable point");
            None
        }
    });
    let property_points = properties.iter().filter_map(|property| match property.point() {
        Ok(p) => Some(p),
        Err(e) => {
            debug!(property = property.display_name(), error = %e, "Skipping unlocatable property");
            None
        }
    });
    hub_points.chain(property_points).collect()
}

/// Moves the camera to enclose a capsule's hubs and properties.
pub struct ViewportController<M: MapCapability> {
    map: SharedMap<M>,
    padding: f64,
}

impl<M: MapCapability> ViewportController<M> {
    pub fn new(map: SharedMap<M>) -> Self {
        Self::with_padding(map, DEFAULT_VIEWPORT_PADDING)
    }

    pub fn with_padding(map: SharedMap<M>, padding: f64) -> Self {
        Self { map, padding }
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// The viewport `fit` would apply, without touching the camera.
    pub fn compute(&self, hubs: &[Hub], properties: &[Property]) -> Result<Option<Viewport>, MapError> {
        let points = locatable_points(hubs, properties);
        let bounds = self.map.inspect(|m| m.compute_bounding_box(&points))?;
        Ok(bounds.map(|bounds| Viewport {
            bounds,
            padding: self.padding,
        }))
    }

    /// Fit the camera to every locatable hub and property.
    ///
    /// With nothing locatable the camera is left untouched and `NoOp` is
    /// returned. Same input, same viewport.
    pub fn fit(&self, hubs: &[Hub], properties: &[Property]) -> Result<FitOutcome, MapError> {
        let Some(viewport) = self.compute(hubs, properties)? else {
            debug!("No locatable points, keeping current camera");
            return Ok(FitOutcome::NoOp);
        };

        self.map
            .with(|m| m.fit_viewport(&viewport.bounds, viewport.padding))?;
        info!(
            south = viewport.bounds.south,
            west = viewport.bounds.west,
            north = viewport.bounds.north,
            east = viewport.bounds.east,
            padding = viewport.padding,
            "Viewport fitted"
        );
        Ok(FitOutcome::Applied(viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::capability::test_support::{MapCall, RecordingMap};
    use tatva_types::geo::RawCoordinate;

    fn controller() -> (ViewportController<RecordingMap>, SharedMap<RecordingMap>) {
        let map = SharedMap::new(RecordingMap::default());
        (ViewportController::new(map.clone()), map)
    }

    fn property_at(lat: &str, lng: &str) -> Property {
        Property {
            latitude: Some(RawCoordinate::from(lat)),
            longitude: Some(RawCoordinate::from(lng)),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_hub_gets_padded_box() {
        let (vc, map) = controller();
        let hubs = vec![Hub::new("Office", "12.90", "77.60")];

        let outcome = vc.fit(&hubs, &[]).unwrap();
        let viewport = outcome.viewport().copied().unwrap();
        let point = GeoPoint::new(12.90, 77.60).unwrap();
        assert!(viewport.bounds.contains(point));
        assert!(viewport.padding > 0.0);
        assert_eq!(map.inspect(|m| m.camera).unwrap(), Some((viewport.bounds, 80.0)));
    }

    #[test]
    fn test_nothing_locatable_is_noop() {
        let (vc, map) = controller();
        let prior = tatva_types::geo::GeoBox::around(GeoPoint { lat: 1.0, lng: 1.0 });
        map.with(|m| m.fit_viewport(&prior, 80.0)).unwrap();

        assert_eq!(vc.fit(&[], &[]).unwrap(), FitOutcome::NoOp);
        let unlocatable = vec![Property::default(), property_at("x", "77.6")];
        assert_eq!(vc.fit(&[], &unlocatable).unwrap(), FitOutcome::NoOp);

        // Camera still where the earlier fit left it, and no further fit calls.
        assert_eq!(map.inspect(|m| m.camera).unwrap(), Some((prior, 80.0)));
        assert_eq!(map.inspect(|m| m.calls.len()).unwrap(), 1);
    }

    #[test]
    fn test_box_encloses_hubs_and_properties_skipping_bad_points() {
        let (vc, _map) = controller();
        let hubs = vec![
            Hub::new("Office", "12.95", "77.70"),
            Hub {
                label: "Broken".to_string(),
                lat: Some(RawCoordinate::from("??")),
                lng: Some(RawCoordinate::from("77.0")),
            },
        ];
        let properties = vec![
            property_at("12.85", "77.55"),
            Property::default(),
            property_at("12.90", "77.65"),
        ];

        let viewport = vc.fit(&hubs, &properties).unwrap().viewport().copied().unwrap();
        assert_eq!(viewport.bounds.south, 12.85);
        assert_eq!(viewport.bounds.north, 12.95);
        assert_eq!(viewport.bounds.west, 77.55);
        assert_eq!(viewport.bounds.east, 77.70);
    }

    #[test]
    fn test_fit_is_idempotent() {
        let (vc, map) = controller();
        let hubs = vec![Hub::new("A", 12.9, 77.6), Hub::new("B", 13.0, 77.7)];
        let first = vc.fit(&hubs, &[]).unwrap();
        let second = vc.fit(&hubs, &[]).unwrap();
        assert_eq!(first, second);

        let calls = map.inspect(|m| m.calls.clone()).unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert!(matches!(calls[0], MapCall::Fit(_, _)));
    }

    #[test]
    fn test_custom_padding() {
        let map = SharedMap::new(RecordingMap::default());
        let vc = ViewportController::with_padding(map, 24.0);
        let hubs = vec![Hub::new("A", 12.9, 77.6)];
        let viewport = vc.compute(&hubs, &[]).unwrap().unwrap();
        assert_eq!(viewport.padding, 24.0);
        assert_eq!(vc.padding(), 24.0);
    }
}
