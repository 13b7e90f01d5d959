//! Infrastructure layer for Tatva.
//!
//! Contains implementations of the ports defined in `tatva-core`: the
//! reqwest-based chat backend and the in-memory scene map, plus the
//! `config.toml` loader and data-directory resolution.

pub mod chat;
pub mod config;
pub mod map;
