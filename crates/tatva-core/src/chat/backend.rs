//! ChatBackend trait definition.

use tatva_types::chat::{ChatRequest, ChatResponse};
use tatva_types::error::ChatError;

/// Trait for the conversational search backend.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in tatva-infra (e.g., `HttpChatBackend`).
pub trait ChatBackend: Send + Sync {
    /// Human-readable backend name used in logs.
    fn name(&self) -> &str;

    /// Send one user message and wait for the assistant's turn to resolve.
    fn send(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatResponse, ChatError>> + Send;
}
