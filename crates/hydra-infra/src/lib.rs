//! Infrastructure implementations for Hydra.
//!
//! Concrete implementations of the `hydra-core` traits: the in-memory
//! session store, the OpenRouter chat-completions backend, and the
//! configuration loader.

pub mod config;
pub mod llm;
pub mod session;
