//! Conversation orchestration core for Hydra.
//!
//! The pipeline for one inbound turn: [`assembler`] builds the ordered
//! message list from a fresh system prompt ([`prompt`]), a bounded history
//! window ([`store::SessionStore`]), and the new user turn;
//! [`dispatcher::Dispatcher`] selects a model by modality and issues the
//! completion through a [`backend::CompletionBackend`]; and
//! [`engine::ChatEngine`] reconciles the outcome back into session state,
//! isolating backend failures so they never corrupt history.
//!
//! Everything here is generic over the store and backend traits; concrete
//! implementations live in `hydra-infra`.

pub mod assembler;
pub mod backend;
pub mod dispatcher;
pub mod engine;
pub mod prompt;
pub mod store;
