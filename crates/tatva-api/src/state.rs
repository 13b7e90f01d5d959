//! Application state wiring configuration and the chat backend together.
//!
//! `ChatService` is generic over the backend trait; AppState pins it to the
//! concrete HTTP implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tatva_core::chat::service::ChatService;
use tatva_infra::chat::HttpChatBackend;
use tatva_infra::config::{apply_overrides, load_global_config, resolve_data_dir};
use tatva_types::config::GlobalConfig;
use tracing::debug;

pub type ConcreteChatService = ChatService<HttpChatBackend>;

/// Shared application state used by every CLI command.
#[derive(Clone)]
pub struct AppState {
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
    pub chat_service: Arc<ConcreteChatService>,
}

impl AppState {
    /// Load configuration, apply CLI overrides, and build the chat client.
    pub async fn init(backend_url: Option<&str>, user_id: Option<&str>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_global_config(&data_dir).await;
        let config = apply_overrides(config, backend_url, user_id);

        let backend = HttpChatBackend::new(
            config.backend_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        debug!(
            backend = %backend.base_url(),
            user_id = %config.user_id,
            data_dir = %data_dir.display(),
            "Application state initialized"
        );

        let chat_service = ChatService::new(backend, config.user_id.clone());

        Ok(Self {
            config,
            data_dir,
            chat_service: Arc::new(chat_service),
        })
    }
}
