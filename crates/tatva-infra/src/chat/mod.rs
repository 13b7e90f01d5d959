//! Chat backend adapters.

pub mod http;

pub use http::HttpChatBackend;
