//! Application state wiring the engine together.
//!
//! The chat engine is generic over store/backend traits; `AppState` pins it
//! to the concrete infra implementations.

use std::sync::Arc;

use secrecy::SecretString;

use hydra_core::dispatcher::ModelSelection;
use hydra_core::engine::ChatEngine;
use hydra_infra::llm::openrouter::{OpenRouterBackend, OpenRouterConfig};
use hydra_infra::session::InMemorySessionStore;
use hydra_types::config::AppConfig;

/// The engine generics pinned to the infra implementations.
pub type ConcreteChatEngine = ChatEngine<InMemorySessionStore, OpenRouterBackend>;

/// Shared application state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConcreteChatEngine>,
}

impl AppState {
    /// Wire the session store and backend into a chat engine.
    pub fn init(config: &AppConfig, api_key: SecretString) -> anyhow::Result<Self> {
        let backend = OpenRouterBackend::new(OpenRouterConfig {
            base_url: config.base_url.clone(),
            api_key,
            site_url: config.site_url.clone(),
            site_name: config.site_name.clone(),
            timeout_secs: config.request_timeout_secs,
        })?;

        let engine = ChatEngine::new(
            InMemorySessionStore::new(),
            backend,
            ModelSelection {
                analysis_model: config.analysis_model.clone(),
                image_model: config.image_model.clone(),
            },
            config.trader_name.clone(),
            config.max_history,
        );

        Ok(Self {
            engine: Arc::new(engine),
        })
    }
}
