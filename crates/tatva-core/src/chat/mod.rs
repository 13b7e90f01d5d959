//! Chat backend abstraction.
//!
//! `ChatBackend` is the port the infrastructure layer implements;
//! `ChatService` wraps it with request validation and instrumentation.

pub mod backend;
pub mod service;
