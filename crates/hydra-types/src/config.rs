//! Application configuration for Hydra.
//!
//! `AppConfig` is loaded from `config.toml` with environment-variable
//! overrides (see `hydra-infra`). Every field has a documented default so a
//! missing or partial file still produces a runnable configuration. The
//! backend API key is deliberately not part of this struct -- it is read
//! from the environment and wrapped in `secrecy::SecretString` by the
//! loader.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Hydra trading assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Display name of the trader the assistant serves.
    #[serde(default = "default_trader_name")]
    pub trader_name: String,

    /// Model identifier for text-only analysis turns.
    #[serde(default = "default_model")]
    pub analysis_model: String,

    /// Model identifier for turns carrying a chart image.
    #[serde(default = "default_model")]
    pub image_model: String,

    /// Maximum number of prior turns included in a backend request window.
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Base URL of the OpenAI-compatible chat completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Referring site sent in the `HTTP-Referer` attribution header.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Product name sent in the `X-Title` attribution header.
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Timeout for a single backend completion call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_trader_name() -> String {
    "Hydra".to_string()
}

fn default_model() -> String {
    "meta-llama/llama-4-maverick:free".to_string()
}

fn default_max_history() -> usize {
    10
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_site_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_site_name() -> String {
    "Hydra Trading System".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_port() -> u16 {
    5000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trader_name: default_trader_name(),
            analysis_model: default_model(),
            image_model: default_model(),
            max_history: default_max_history(),
            base_url: default_base_url(),
            site_url: default_site_url(),
            site_name: default_site_name(),
            request_timeout_secs: default_request_timeout_secs(),
            port: default_port(),
        }
    }
}
