use thiserror::Error;

/// Failures between issuing a completion request and extracting its text.
///
/// Recovered locally by the chat engine: history is left untouched and a
/// diagnostic reply is returned instead of propagating. Never retried.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Network(String),

    #[error("backend request timed out after {0}s")]
    Timeout(u64),

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed backend response: {0}")]
    Deserialization(String),

    #[error("backend response contained no completion text")]
    EmptyCompletion,
}

/// Failure to read or write session history.
///
/// Not masked: propagated up as a server-side failure because consistent
/// history is a precondition of the orchestration pipeline.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
