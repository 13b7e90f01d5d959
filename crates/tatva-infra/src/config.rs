//! Global configuration loader for Tatva.
//!
//! Reads `config.toml` from the data directory (`~/.tatva/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use tatva_types::config::GlobalConfig;

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Apply command-line overrides on top of the loaded file.
///
/// Blank overrides are ignored so `--backend ""` cannot wipe the URL.
pub fn apply_overrides(
    mut config: GlobalConfig,
    backend_url: Option<&str>,
    user_id: Option<&str>,
) -> GlobalConfig {
    if let Some(url) = backend_url.map(str::trim).filter(|u| !u.is_empty()) {
        config.backend_url = url.to_string();
    }
    if let Some(user) = user_id.map(str::trim).filter(|u| !u.is_empty()) {
        config.user_id = user.to_string();
    }
    config
}

/// Resolve the Tatva data directory.
///
/// Uses `TATVA_DATA_DIR` env var if set, otherwise `~/.tatva`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TATVA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".tatva");
    }

    // Last resort: current directory
    PathBuf::from(".tatva")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tatva_types::context::Theme;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config, GlobalConfig::default());
        assert_eq!(config.backend_url, "http://localhost:8000");
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
backend_url = "https://search.example.in"
user_id = "krishna"
theme = "dark"

[map]
viewport_padding = 40.0
default_zoom = 14
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.backend_url, "https://search.example.in");
        assert_eq!(config.user_id, "krishna");
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.map.viewport_padding, 40.0);
        assert_eq!(config.map.default_zoom, 14);
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn apply_overrides_replaces_fields() {
        let config = apply_overrides(GlobalConfig::default(), Some("http://10.0.0.2:9000"), Some("asha"));
        assert_eq!(config.backend_url, "http://10.0.0.2:9000");
        assert_eq!(config.user_id, "asha");
    }

    #[test]
    fn apply_overrides_ignores_blank_values() {
        let config = apply_overrides(GlobalConfig::default(), Some("  "), None);
        assert_eq!(config, GlobalConfig::default());
    }
}
