//! Chat service sending user messages to the backend.
//!
//! ChatService owns the backend and the user identity for one session. It
//! rejects empty messages before they hit the network and records timing
//! for every turn. It never touches session or map state; the orchestrator
//! does that once the turn resolves.

use std::time::Instant;

use tatva_types::chat::{ChatRequest, ChatResponse};
use tatva_types::error::ChatError;
use tracing::{Instrument, info, info_span, warn};

use crate::chat::backend::ChatBackend;

/// Sends user messages for a single user through a [`ChatBackend`].
pub struct ChatService<B: ChatBackend> {
    backend: B,
    user_id: String,
}

impl<B: ChatBackend> ChatService<B> {
    pub fn new(backend: B, user_id: impl Into<String>) -> Self {
        Self {
            backend,
            user_id: user_id.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Send one message and return the backend's response.
    ///
    /// Blank messages are rejected with [`ChatError::InvalidRequest`]
    /// without contacting the backend.
    pub async fn ask(&self, message: &str) -> Result<ChatResponse, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::InvalidRequest("message is empty".to_string()));
        }

        let request = ChatRequest {
            user_id: self.user_id.clone(),
            message: message.to_string(),
        };

        let span = info_span!(
            "chat_turn",
            backend = self.backend.name(),
            user_id = %self.user_id,
        );

        async {
            let started = Instant::now();
            let result = self.backend.send(&request).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match &result {
                Ok(response) => info!(
                    status = %response.status,
                    properties = response.properties.as_ref().map_or(0, Vec::len),
                    elapsed_ms,
                    "Chat turn resolved"
                ),
                Err(e) => warn!(error = %e, elapsed_ms, "Chat turn failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tatva_types::chat::TurnStatus;

    struct FakeBackend {
        reply: ChatResponse,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl FakeBackend {
        fn new(reply: ChatResponse) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatBackend for FakeBackend {
        fn name(&self) -> &str {
            "fake"
        }

        async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }
    }

    struct DownBackend;

    impl ChatBackend for DownBackend {
        fn name(&self) -> &str {
            "down"
        }

        async fn send(&self, _request: &ChatRequest) -> Result<ChatResponse, ChatError> {
            Err(ChatError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_ask_sends_trimmed_message_with_user_id() {
        let reply = ChatResponse {
            response: "Which area?".to_string(),
            status: TurnStatus::Incomplete,
            ..Default::default()
        };
        let service = ChatService::new(FakeBackend::new(reply.clone()), "krishna");

        let response = service.ask("  2BHK please  ").await.unwrap();
        assert_eq!(response, reply);

        let seen = service.backend().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].user_id, "krishna");
        assert_eq!(seen[0].message, "2BHK please");
    }

    #[tokio::test]
    async fn test_ask_rejects_blank_message() {
        let service = ChatService::new(FakeBackend::new(ChatResponse::default()), "u");
        let err = service.ask("   ").await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidRequest(_)));
        assert!(service.backend().seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ask_propagates_backend_errors() {
        let service = ChatService::new(DownBackend, "u");
        let err = service.ask("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
    }
}
