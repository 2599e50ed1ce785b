//! Chat engine: per-turn orchestration and session reconciliation.
//!
//! One inbound turn moves through `Idle -> AwaitingBackend -> {Reconciled |
//! Rejected}`. `Reconciled` appends exactly one (user, assistant) pair to
//! the session's history; `Rejected` never mutates stored history and
//! surfaces a diagnostic reply instead of propagating the backend fault.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{error, info};

use hydra_types::chat::Turn;
use hydra_types::error::StoreError;

use crate::assembler::assemble;
use crate::backend::CompletionBackend;
use crate::dispatcher::{Dispatcher, ModelSelection};
use crate::prompt::build_system_prompt;
use crate::store::SessionStore;

/// Orchestrates the assemble / dispatch / reconcile pipeline for one
/// session store and one completion backend.
///
/// Generic over [`SessionStore`] and [`CompletionBackend`] so the core
/// never depends on a particular storage technology or HTTP client.
pub struct ChatEngine<S: SessionStore, B: CompletionBackend> {
    store: S,
    dispatcher: Dispatcher<B>,
    trader_name: String,
    max_history: usize,
    /// Per-session mutexes serializing same-session turns. Entries are
    /// created lazily and live for the process lifetime.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S: SessionStore, B: CompletionBackend> ChatEngine<S, B> {
    pub fn new(store: S, backend: B, models: ModelSelection, trader_name: String, max_history: usize) -> Self {
        Self {
            store,
            dispatcher: Dispatcher::new(backend, models),
            trader_name,
            max_history,
            locks: DashMap::new(),
        }
    }

    /// Access the underlying session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Process one inbound turn and return the text shown to the caller.
    ///
    /// Turns for the same session are serialized: two interleaved calls can
    /// never both read the same window and then both append. A
    /// `BackendError` is recovered here -- history stays untouched and the
    /// reply is a diagnostic string. A `StoreError` propagates.
    pub async fn handle_turn(
        &self,
        session_id: &str,
        text: &str,
        image: Option<&[u8]>,
    ) -> Result<String, StoreError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock().await;

        // Exactly once per inbound turn, before dispatch, regardless of
        // dispatch outcome.
        self.store.touch(session_id, Utc::now()).await?;

        let window = self.store.get_window(session_id, self.max_history).await?;
        let system_prompt = build_system_prompt(Utc::now(), &self.trader_name);
        let assembled = assemble(window, system_prompt, text, image);

        info!(
            session_id,
            has_image = assembled.has_image,
            preview = %text.chars().take(50).collect::<String>(),
            "processing turn"
        );

        match self
            .dispatcher
            .dispatch(assembled.messages, assembled.has_image)
            .await
        {
            Ok(reply) => {
                // The pair append is one store call so a partial exchange
                // is never observable.
                let assistant_turn = Turn::assistant(reply.clone());
                self.store
                    .append(session_id, vec![assembled.user_turn, assistant_turn])
                    .await?;
                Ok(reply)
            }
            Err(err) => {
                error!(session_id, error = %err, "completion dispatch failed");
                Ok(format!(
                    "I encountered an issue processing your request. \
Please try again. Error details: {err}"
                ))
            }
        }
    }

    /// Empty the session's history; identity and `last_interaction` survive.
    pub async fn clear_history(&self, session_id: &str) -> Result<(), StoreError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock().await;
        self.store.clear(session_id).await
    }
}
