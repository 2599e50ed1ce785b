//! Configuration loader for Hydra.
//!
//! Reads `config.toml` and deserializes it into
//! [`AppConfig`], falling back to defaults when the file is missing or
//! malformed. Environment variables override file values so deployments can
//! configure the service without editing files. The API key is read only
//! from the environment and wrapped in [`SecretString`].

use std::path::Path;

use secrecy::SecretString;

use hydra_types::config::AppConfig;

/// Environment variable holding the backend API key.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Load configuration from `config_path`, then apply environment overrides.
///
/// - Missing file: returns [`AppConfig::default()`].
/// - Unparseable file: logs a warning and returns the default.
pub async fn load_config(config_path: &Path) -> AppConfig {
    let config = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => match toml::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    };

    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Read the backend API key from the environment.
pub fn load_api_key() -> Option<SecretString> {
    std::env::var(API_KEY_ENV).ok().map(SecretString::from)
}

/// Apply environment-style overrides to a loaded config.
///
/// `lookup` abstracts `std::env::var` so tests never mutate process-global
/// state. A `MAX_HISTORY` value that fails to parse is ignored with a
/// warning rather than killing startup.
fn apply_overrides(mut config: AppConfig, lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    if let Some(name) = lookup("TRADER_NAME") {
        config.trader_name = name;
    }
    if let Some(model) = lookup("ANALYSIS_MODEL") {
        config.analysis_model = model;
    }
    if let Some(model) = lookup("IMAGE_MODEL") {
        config.image_model = model;
    }
    if let Some(url) = lookup("OPENROUTER_BASE_URL") {
        config.base_url = url;
    }
    if let Some(url) = lookup("SITE_URL") {
        config.site_url = url;
    }
    if let Some(name) = lookup("SITE_NAME") {
        config.site_name = name;
    }
    if let Some(raw) = lookup("MAX_HISTORY") {
        match raw.parse() {
            Ok(n) => config.max_history = n,
            Err(_) => tracing::warn!("Ignoring unparseable MAX_HISTORY value '{raw}'"),
        }
    }
    config
}
