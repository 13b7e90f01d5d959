//! MapCapability trait definition and the shared map handle.
//!
//! The controllers only ever see a mapping provider through these five
//! primitives, so any provider (a browser map SDK bridge, a headless scene
//! recorder, a test double) can sit behind them.

use std::sync::{Arc, Mutex};

use tatva_types::error::MapError;
use tatva_types::geo::{GeoBox, GeoPoint};
use tatva_types::map::{OverlayHandle, OverlayStyle};

/// Drawing primitives required from a mapping provider.
///
/// Implementations live in tatva-infra (e.g., `SceneMap`).
pub trait MapCapability: Send {
    /// Minimal box enclosing `points`, or `None` when there are none.
    fn compute_bounding_box(&self, points: &[GeoPoint]) -> Option<GeoBox> {
        GeoBox::from_points(points)
    }

    /// Move the camera so `bounds` is visible with `padding` around it.
    fn fit_viewport(&mut self, bounds: &GeoBox, padding: f64) -> Result<(), MapError>;

    fn draw_rectangle(
        &mut self,
        bounds: &GeoBox,
        style: &OverlayStyle,
    ) -> Result<OverlayHandle, MapError>;

    /// Draw a closed polygon through `vertices` in the given order.
    fn draw_polygon(
        &mut self,
        vertices: &[GeoPoint],
        style: &OverlayStyle,
    ) -> Result<OverlayHandle, MapError>;

    fn remove_overlay(&mut self, handle: OverlayHandle) -> Result<(), MapError>;
}

/// Handle to the one map instance a search session draws on.
///
/// Mutation is crate-private: only `ViewportController` and `BoundaryPolicy`
/// change the camera or overlays. Everyone else can read through
/// [`SharedMap::inspect`].
pub struct SharedMap<M> {
    inner: Arc<Mutex<M>>,
}

impl<M: MapCapability> SharedMap<M> {
    pub fn new(map: M) -> Self {
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    /// Read-only access to the provider's state.
    pub fn inspect<R>(&self, f: impl FnOnce(&M) -> R) -> Result<R, MapError> {
        let guard = self.inner.lock().map_err(|_| MapError::Poisoned)?;
        Ok(f(&guard))
    }

    pub(crate) fn with<R>(
        &self,
        f: impl FnOnce(&mut M) -> Result<R, MapError>,
    ) -> Result<R, MapError> {
        let mut guard = self.inner.lock().map_err(|_| MapError::Poisoned)?;
        f(&mut guard)
    }
}

impl<M> Clone for SharedMap<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A map double that records every primitive call.

    use std::collections::BTreeMap;

    use super::*;
    use tatva_types::map::OverlayShape;

    #[derive(Debug, Clone, PartialEq)]
    pub enum MapCall {
        Fit(GeoBox, f64),
        Rectangle(GeoBox),
        Polygon(Vec<GeoPoint>),
        Remove(OverlayHandle),
    }

    #[derive(Debug, Default)]
    pub struct RecordingMap {
        pub calls: Vec<MapCall>,
        pub camera: Option<(GeoBox, f64)>,
        pub live: BTreeMap<OverlayHandle, OverlayShape>,
        pub next_handle: u64,
        pub fail_draws: bool,
    }

    impl RecordingMap {
        pub fn draws(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, MapCall::Rectangle(_) | MapCall::Polygon(_)))
                .count()
        }

        pub fn removes(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, MapCall::Remove(_)))
                .count()
        }

        fn issue(&mut self, shape: OverlayShape) -> Result<OverlayHandle, MapError> {
            if self.fail_draws {
                return Err(MapError::Provider("draw refused".to_string()));
            }
            self.next_handle += 1;
            let handle = OverlayHandle(self.next_handle);
            self.live.insert(handle, shape);
            Ok(handle)
        }
    }

    impl MapCapability for RecordingMap {
        fn fit_viewport(&mut self, bounds: &GeoBox, padding: f64) -> Result<(), MapError> {
            self.calls.push(MapCall::Fit(*bounds, padding));
            self.camera = Some((*bounds, padding));
            Ok(())
        }

        fn draw_rectangle(
            &mut self,
            bounds: &GeoBox,
            _style: &OverlayStyle,
        ) -> Result<OverlayHandle, MapError> {
            self.calls.push(MapCall::Rectangle(*bounds));
            self.issue(OverlayShape::Rectangle { bounds: *bounds })
        }

        fn draw_polygon(
            &mut self,
            vertices: &[GeoPoint],
            _style: &OverlayStyle,
        ) -> Result<OverlayHandle, MapError> {
            self.calls.push(MapCall::Polygon(vertices.to_vec()));
            self.issue(OverlayShape::Polygon {
                vertices: vertices.to_vec(),
            })
        }

        fn remove_overlay(&mut self, handle: OverlayHandle) -> Result<(), MapError> {
            self.calls.push(MapCall::Remove(handle));
            self.live
                .remove(&handle)
                .map(|_| ())
                .ok_or(MapError::UnknownOverlay(handle.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingMap;
    use super::*;

    #[test]
    fn test_default_bounding_box() {
        let map = RecordingMap::default();
        let points = [
            GeoPoint { lat: 1.0, lng: 5.0 },
            GeoPoint { lat: 3.0, lng: 2.0 },
        ];
        let bounds = map.compute_bounding_box(&points).unwrap();
        assert_eq!(bounds.south, 1.0);
        assert_eq!(bounds.north, 3.0);
        assert_eq!(bounds.west, 2.0);
        assert_eq!(bounds.east, 5.0);
        assert!(map.compute_bounding_box(&[]).is_none());
    }

    #[test]
    fn test_clones_share_one_map() {
        let shared = SharedMap::new(RecordingMap::default());
        let other = shared.clone();
        let bounds = GeoBox::around(GeoPoint { lat: 1.0, lng: 1.0 });
        other.with(|m| m.fit_viewport(&bounds, 10.0)).unwrap();
        let camera = shared.inspect(|m| m.camera).unwrap();
        assert_eq!(camera, Some((bounds, 10.0)));
    }
}
