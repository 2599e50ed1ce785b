//! OpenRouterBackend -- concrete [`CompletionBackend`] for any
//! OpenAI-compatible chat completions API.
//!
//! Sends requests to `{base_url}/chat/completions` with bearer
//! authentication plus the `HTTP-Referer` / `X-Title` attribution headers
//! OpenRouter uses to credit the referring product.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use hydra_core::backend::CompletionBackend;
use hydra_types::error::BackendError;
use hydra_types::llm::{CompletionRequest, CompletionResponse};

use self::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Configuration for an [`OpenRouterBackend`].
pub struct OpenRouterConfig {
    /// Base URL of the API (e.g., "https://openrouter.ai/api/v1").
    pub base_url: String,
    /// API key for bearer authentication.
    pub api_key: SecretString,
    /// Referring site, sent as `HTTP-Referer`.
    pub site_url: String,
    /// Product name, sent as `X-Title`.
    pub site_name: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// OpenAI-compatible chat completions backend.
///
/// Intentionally does NOT derive Debug so the API key inside the config can
/// never leak through debug formatting.
pub struct OpenRouterBackend {
    client: reqwest::Client,
    config: OpenRouterConfig,
}

impl OpenRouterBackend {
    /// Create a backend from a configuration.
    ///
    /// The request timeout is baked into the HTTP client; exceeding it
    /// surfaces as [`BackendError::Timeout`].
    pub fn new(config: OpenRouterConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.config.timeout_secs)
        } else {
            BackendError::Network(err.to_string())
        }
    }
}

impl CompletionBackend for OpenRouterBackend {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, BackendError> {
        let body = ChatCompletionRequest {
            model: request.model.clone(),
            messages: request.messages.clone(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.config.api_key.expose_secret())
            .header("HTTP-Referer", &self.config.site_url)
            .header("X-Title", &self.config.site_name)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Deserialization(e.to_string()))?;

        extract_content(completion, &request.model)
    }
}

/// Pull the first choice's text out of a parsed response.
///
/// An empty choice list or absent/blank content is a failure: the caller
/// must never reconcile an empty assistant turn into history.
fn extract_content(
    completion: ChatCompletionResponse,
    requested_model: &str,
) -> Result<CompletionResponse, BackendError> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(BackendError::EmptyCompletion)?;

    if content.trim().is_empty() {
        return Err(BackendError::EmptyCompletion);
    }

    Ok(CompletionResponse {
        content,
        model: completion.model.unwrap_or_else(|| requested_model.to_string()),
    })
}
