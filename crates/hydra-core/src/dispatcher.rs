//! Backend dispatcher.
//!
//! Selects a model identifier based on input modality, issues the
//! completion with fixed sampling parameters, and measures latency for
//! observability. Failures are returned as-is -- retry/backoff, if wanted,
//! must be layered outside so it cannot duplicate a just-appended pair.

use std::time::Instant;

use tracing::info;

use hydra_types::error::BackendError;
use hydra_types::chat::Turn;
use hydra_types::llm::CompletionRequest;

use crate::backend::CompletionBackend;

/// Fixed sampling temperature for every completion.
pub const TEMPERATURE: f64 = 0.2;

/// Fixed output token budget for every completion.
pub const MAX_OUTPUT_TOKENS: u32 = 800;

/// The two externally configured model identifiers, chosen by modality.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    /// Model for text-only analysis turns.
    pub analysis_model: String,
    /// Model for turns carrying a chart image.
    pub image_model: String,
}

/// Dispatches assembled message lists to a [`CompletionBackend`].
pub struct Dispatcher<B: CompletionBackend> {
    backend: B,
    models: ModelSelection,
}

impl<B: CompletionBackend> Dispatcher<B> {
    pub fn new(backend: B, models: ModelSelection) -> Self {
        Self { backend, models }
    }

    /// Issue one completion request and return the assistant's reply text.
    pub async fn dispatch(
        &self,
        messages: Vec<Turn>,
        has_image: bool,
    ) -> Result<String, BackendError> {
        let model = if has_image {
            &self.models.image_model
        } else {
            &self.models.analysis_model
        };

        let request = CompletionRequest {
            model: model.clone(),
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let start = Instant::now();
        let response = self.backend.complete(&request).await?;

        // Latency is recorded for observability only, never for control flow.
        info!(
            backend = self.backend.name(),
            model = %request.model,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "completion received"
        );

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use hydra_types::llm::CompletionResponse;

    /// Backend double that records the last request and replies with a
    /// canned string.
    struct RecordingBackend {
        last_request: Mutex<Option<CompletionRequest>>,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                last_request: Mutex::new(None),
            }
        }
    }

    impl CompletionBackend for RecordingBackend {
        fn name(&self) -> &str {
            "recording"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, BackendError> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            Ok(CompletionResponse {
                content: "reply".to_string(),
                model: request.model.clone(),
            })
        }
    }

    fn models() -> ModelSelection {
        ModelSelection {
            analysis_model: "text-model".to_string(),
            image_model: "vision-model".to_string(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_selects_analysis_model_for_text() {
        let dispatcher = Dispatcher::new(RecordingBackend::new(), models());
        let reply = dispatcher
            .dispatch(vec![Turn::user("hi")], false)
            .await
            .unwrap();
        assert_eq!(reply, "reply");

        let request = dispatcher.backend.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "text-model");
    }

    #[tokio::test]
    async fn test_dispatch_selects_image_model_for_chart() {
        let dispatcher = Dispatcher::new(RecordingBackend::new(), models());
        dispatcher
            .dispatch(vec![Turn::user("chart")], true)
            .await
            .unwrap();

        let request = dispatcher.backend.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "vision-model");
    }

    #[tokio::test]
    async fn test_dispatch_fixed_sampling_parameters() {
        let dispatcher = Dispatcher::new(RecordingBackend::new(), models());
        dispatcher.dispatch(vec![Turn::user("hi")], false).await.unwrap();

        let request = dispatcher.backend.last_request.lock().unwrap().clone().unwrap();
        assert!((request.temperature - 0.2).abs() < f64::EPSILON);
        assert_eq!(request.max_tokens, 800);
    }

    #[tokio::test]
    async fn test_dispatch_propagates_backend_error() {
        struct FailingBackend;

        impl CompletionBackend for FailingBackend {
            fn name(&self) -> &str {
                "failing"
            }

            async fn complete(
                &self,
                _request: &CompletionRequest,
            ) -> Result<CompletionResponse, BackendError> {
                Err(BackendError::Timeout(30))
            }
        }

        let dispatcher = Dispatcher::new(FailingBackend, models());
        let err = dispatcher
            .dispatch(vec![Turn::user("hi")], false)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Timeout(30)));
    }
}
