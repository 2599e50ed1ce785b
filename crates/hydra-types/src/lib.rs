//! Shared domain types for Hydra.
//!
//! This crate contains the types used across the Hydra trading assistant:
//! conversation turns, completion request/response shapes, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
