//! Model backend implementations.

pub mod openrouter;

pub use openrouter::OpenRouterBackend;
