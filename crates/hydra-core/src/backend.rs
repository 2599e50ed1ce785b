//! CompletionBackend trait definition.
//!
//! The abstraction over the hosted chat-completion API. Uses native async
//! fn in traits (RPITIT, Rust 2024 edition). The concrete implementation
//! lives in hydra-infra (`OpenRouterBackend`).

use hydra_types::error::BackendError;
use hydra_types::llm::{CompletionRequest, CompletionResponse};

/// A chat-completion backend.
///
/// One call per inbound turn; the call is bounded by the implementation's
/// request timeout, and exceeding it surfaces as [`BackendError::Timeout`].
/// Retries are an external-policy concern, never performed here.
///
/// [`BackendError::Timeout`]: hydra_types::error::BackendError::Timeout
pub trait CompletionBackend: Send + Sync {
    /// Human-readable backend name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Issue a completion request and return the first choice's text.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, BackendError>> + Send;
}
