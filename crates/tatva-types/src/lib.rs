//! Shared domain types for Tatva.
//!
//! This crate contains the types used across the Tatva workspace: geographic
//! points and boxes, the property/hub/zone records returned by the search
//! backend, search capsules, map overlay descriptions, the session context,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, uuid, chrono, thiserror.

pub mod capsule;
pub mod chat;
pub mod config;
pub mod context;
pub mod error;
pub mod geo;
pub mod map;
pub mod property;
mod wire;
