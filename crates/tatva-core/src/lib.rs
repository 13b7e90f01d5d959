//! Search session logic and port definitions for Tatva.
//!
//! This crate defines the "ports" (the chat backend and the mapping
//! capability) that the infrastructure layer implements, plus the session
//! state machine and map controllers built on top of them. It depends only on
//! `tatva-types` -- never on `tatva-infra` or any network/IO crate.

pub mod chat;
pub mod filter;
pub mod map;
pub mod orchestrator;
pub mod session;
