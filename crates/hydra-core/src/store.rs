//! SessionStore trait definition.
//!
//! The session store is the only shared mutable resource in the core. It is
//! addressed exclusively by opaque session identifier -- never iterated or
//! mutated by identifier ranges.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).
//! Implementations live in hydra-infra (e.g., `InMemorySessionStore`).

use chrono::{DateTime, Utc};

use hydra_types::chat::Turn;
use hydra_types::error::StoreError;

/// Per-session conversation history, keyed by an opaque identifier.
///
/// Sessions are created lazily on first write. `append` must be atomic with
/// respect to concurrent callers on the same session; no atomicity is
/// required across different sessions.
pub trait SessionStore: Send + Sync {
    /// The most recent `limit` turns in chronological order (oldest of the
    /// window first). Empty if no session exists yet.
    fn get_window(
        &self,
        session_id: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, StoreError>> + Send;

    /// Append turns to the end of the session's history, preserving order.
    /// Creates the session if absent.
    fn append(
        &self,
        session_id: &str,
        turns: Vec<Turn>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Empty the session's history in place without destroying the session
    /// identity or its `last_interaction` timestamp.
    fn clear(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Record the time of an inbound turn. Creates the session if absent.
    fn touch(
        &self,
        session_id: &str,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// When the session last saw an inbound turn, if it exists.
    fn last_interaction(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<DateTime<Utc>>, StoreError>> + Send;
}
