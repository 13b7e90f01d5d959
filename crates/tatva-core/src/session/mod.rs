//! Search session state: the capsule store and capsule labelling.

pub mod label;
pub mod store;
