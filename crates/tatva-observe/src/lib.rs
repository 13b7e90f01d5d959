//! Observability for Tatva: tracing subscriber setup and the attribute
//! names used on search spans.

pub mod search_attrs;
pub mod tracing_setup;
