//! In-memory session store.
//!
//! Best-effort process-local storage backed by a `DashMap`. Per-key shard
//! locking gives the same-session atomicity the store contract requires;
//! different sessions never contend beyond the map's own sharding.
//!
//! Retention is one day, enforced lazily: an entry whose `last_interaction`
//! has aged out is dropped the next time its own key is accessed. The map
//! is never swept by iterating identifiers.

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;

use hydra_core::store::SessionStore;
use hydra_types::chat::Turn;
use hydra_types::error::StoreError;

/// How long a session survives without an inbound turn.
const RETENTION_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
struct SessionEntry {
    history: Vec<Turn>,
    last_interaction: DateTime<Utc>,
}

impl SessionEntry {
    fn new(at: DateTime<Utc>) -> Self {
        Self {
            history: Vec::new(),
            last_interaction: at,
        }
    }

    fn expired(&self, now: DateTime<Utc>) -> bool {
        now - self.last_interaction > TimeDelta::seconds(RETENTION_SECS)
    }
}

/// Process-local [`SessionStore`] keyed by opaque session identifier.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionEntry>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the entry if it has aged out. Returns true when it was removed.
    fn evict_if_expired(&self, session_id: &str, now: DateTime<Utc>) -> bool {
        let expired = self
            .sessions
            .get(session_id)
            .is_some_and(|entry| entry.expired(now));
        if expired {
            self.sessions.remove(session_id);
        }
        expired
    }
}

impl SessionStore for InMemorySessionStore {
    async fn get_window(&self, session_id: &str, limit: usize) -> Result<Vec<Turn>, StoreError> {
        if self.evict_if_expired(session_id, Utc::now()) {
            return Ok(Vec::new());
        }
        Ok(self
            .sessions
            .get(session_id)
            .map(|entry| {
                let skip = entry.history.len().saturating_sub(limit);
                entry.history[skip..].to_vec()
            })
            .unwrap_or_default())
    }

    async fn append(&self, session_id: &str, turns: Vec<Turn>) -> Result<(), StoreError> {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry::new(Utc::now()))
            .history
            .extend(turns);
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> Result<(), StoreError> {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.history.clear();
        }
        Ok(())
    }

    async fn touch(&self, session_id: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry::new(at));
        if entry.expired(at) {
            entry.history.clear();
        }
        entry.last_interaction = at;
        Ok(())
    }

    async fn last_interaction(
        &self,
        session_id: &str,
    ) -> Result<Option<DateTime<Utc>>, StoreError> {
        if self.evict_if_expired(session_id, Utc::now()) {
            return Ok(None);
        }
        Ok(self
            .sessions
            .get(session_id)
            .map(|entry| entry.last_interaction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_session_reads_empty() {
        let store = InMemorySessionStore::new();
        assert!(store.get_window("nope", 10).await.unwrap().is_empty());
        assert!(store.last_interaction("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = InMemorySessionStore::new();
        store
            .append("s1", vec![Turn::user("one"), Turn::assistant("two")])
            .await
            .unwrap();
        store.append("s1", vec![Turn::user("three")]).await.unwrap();

        let window = store.get_window("s1", 10).await.unwrap();
        let texts: Vec<&str> = window.iter().map(|t| t.content.text()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_window_returns_most_recent_in_order() {
        let store = InMemorySessionStore::new();
        let turns: Vec<Turn> = (0..8).map(|i| Turn::user(format!("m{i}"))).collect();
        store.append("s1", turns).await.unwrap();

        let window = store.get_window("s1", 3).await.unwrap();
        let texts: Vec<&str> = window.iter().map(|t| t.content.text()).collect();
        assert_eq!(texts, ["m5", "m6", "m7"]);
    }

    #[tokio::test]
    async fn test_window_limit_larger_than_history() {
        let store = InMemorySessionStore::new();
        store.append("s1", vec![Turn::user("only")]).await.unwrap();
        assert_eq!(store.get_window("s1", 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_preserves_last_interaction() {
        let store = InMemorySessionStore::new();
        let at = Utc::now();
        store.touch("s1", at).await.unwrap();
        store
            .append("s1", vec![Turn::user("u"), Turn::assistant("a")])
            .await
            .unwrap();

        store.clear("s1").await.unwrap();

        assert!(store.get_window("s1", 10).await.unwrap().is_empty());
        assert_eq!(store.last_interaction("s1").await.unwrap(), Some(at));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        store.append("s1", vec![Turn::user("one")]).await.unwrap();
        store.append("s2", vec![Turn::user("two")]).await.unwrap();

        assert_eq!(store.get_window("s1", 10).await.unwrap()[0].content.text(), "one");
        assert_eq!(store.get_window("s2", 10).await.unwrap()[0].content.text(), "two");
    }

    #[tokio::test]
    async fn test_stale_session_expires_on_access() {
        let store = InMemorySessionStore::new();
        store
            .append("s1", vec![Turn::user("old"), Turn::assistant("reply")])
            .await
            .unwrap();
        // Last inbound turn two days ago
        store
            .touch("s1", Utc::now() - TimeDelta::days(2))
            .await
            .unwrap();

        assert!(store.get_window("s1", 10).await.unwrap().is_empty());
        assert!(store.last_interaction("s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_touch_on_stale_session_starts_fresh() {
        let store = InMemorySessionStore::new();
        store.append("s1", vec![Turn::user("old")]).await.unwrap();
        store
            .touch("s1", Utc::now() - TimeDelta::days(2))
            .await
            .unwrap();

        // New inbound turn on the expired session: history starts over.
        let now = Utc::now();
        store.touch("s1", now).await.unwrap();
        assert!(store.get_window("s1", 10).await.unwrap().is_empty());
        assert_eq!(store.last_interaction("s1").await.unwrap(), Some(now));
    }
}
