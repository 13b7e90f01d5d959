//! Scoped ownership of a drawn overlay.
//!
//! An `OverlayGuard` is created right after a provider draws a shape and
//! removes that shape when it is released or dropped, whichever comes
//! first. Holding the guard is the only way an overlay stays on the map.

use tatva_types::error::MapError;
use tatva_types::map::{OverlayHandle, OverlayShape};
use tracing::{debug, warn};

use super::capability::{MapCapability, SharedMap};

/// Owns one live overlay on a [`SharedMap`].
pub struct OverlayGuard<M: MapCapability> {
    map: SharedMap<M>,
    handle: OverlayHandle,
    shape: OverlayShape,
    released: bool,
}

impl<M: MapCapability> OverlayGuard<M> {
    pub(crate) fn new(map: SharedMap<M>, handle: OverlayHandle, shape: OverlayShape) -> Self {
        debug!(overlay = %handle, kind = shape.kind(), "Overlay acquired");
        Self {
            map,
            handle,
            shape,
            released: false,
        }
    }

    pub fn handle(&self) -> OverlayHandle {
        self.handle
    }

    pub fn shape(&self) -> &OverlayShape {
        &self.shape
    }

    /// Remove the overlay now and report whether the provider accepted it.
    pub fn release(mut self) -> Result<(), MapError> {
        self.remove()
    }

    fn remove(&mut self) -> Result<(), MapError> {
        if self.released {
            return Ok(());
        }
        // Marked first so a failing provider is never asked twice.
        self.released = true;
        let handle = self.handle;
        self.map.with(|m| m.remove_overlay(handle))?;
        debug!(overlay = %handle, "Overlay released");
        Ok(())
    }
}

impl<M: MapCapability> Drop for OverlayGuard<M> {
    fn drop(&mut self) {
        if let Err(e) = self.remove() {
            warn!(overlay = %self.handle, error = %e, "Failed to remove overlay on drop");
        }
    }
}
