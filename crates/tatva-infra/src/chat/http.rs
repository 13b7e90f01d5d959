//! HttpChatBackend -- concrete [`ChatBackend`] over HTTP/JSON.
//!
//! Posts `{ user_id, message }` to `{base_url}/chat` and decodes the
//! assistant's turn. Transport, auth and retry policy beyond a request
//! timeout belong to whatever sits in front of the backend.

use std::time::Duration;

use tatva_core::chat::backend::ChatBackend;
use tatva_types::chat::{ChatRequest, ChatResponse};
use tatva_types::error::ChatError;
use tracing::debug;

/// Chat backend reached over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    /// Create a backend client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Transport(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ChatError::InvalidRequest("backend URL is empty".to_string()));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ChatBackend for HttpChatBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let url = self.url("/chat");
        debug!(url = %url, "Posting chat message");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(format!("failed to read response body: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| ChatError::Deserialization(format!("failed to parse chat response: {e}")))
    }
}
