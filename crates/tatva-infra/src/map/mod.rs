//! Mapping provider adapters.

pub mod scene;

pub use scene::SceneMap;
