//! Map camera and overlay control.
//!
//! - `MapCapability`: the drawing primitives a mapping provider supplies
//! - `SharedMap`: the single handle through which the controllers reach it
//! - `ViewportController`: fits the camera to a capsule's points
//! - `BoundaryPolicy`: picks and draws at most one boundary overlay

pub mod boundary;
pub mod capability;
pub mod overlay;
pub mod viewport;
