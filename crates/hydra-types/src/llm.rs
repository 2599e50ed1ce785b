//! Completion request/response shapes exchanged with the model backend.

use serde::{Deserialize, Serialize};

use crate::chat::Turn;

/// Request to the model backend for a chat completion.
///
/// `messages` is the fully assembled turn list: system turn first, then the
/// bounded history window, then the new user turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Turn>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Response from the model backend: the first choice's textual content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    /// Model identifier echoed by the backend, for logging.
    pub model: String,
}
