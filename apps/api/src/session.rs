//! Session-scoped storage for analysis results.
//!
//! A result lives here from the moment its LLM call succeeds until the client
//! discards it ("analyze another resume"), it sits idle past the TTL, or the
//! store is full and it is the least recently used entry. Stored results are
//! immutable and shared as `Arc`s; the map is the only mutable state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::analysis::model::AnalysisResult;
use crate::extraction::FileKind;

/// Where the analysed text came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnalysisSource {
    Text,
    #[serde(rename_all = "camelCase")]
    File {
        file_name: Option<String>,
        file_kind: FileKind,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnalysis {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub source: AnalysisSource,
    pub result: Arc<AnalysisResult>,
}

struct Entry {
    analysis: Arc<StoredAnalysis>,
    last_access: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AnalysisStore {
    entries: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
    max_entries: usize,
}

impl AnalysisStore {
    /// `max_entries` is clamped to at least one.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Stores a freshly received result under a new id.
    pub async fn insert(&self, source: AnalysisSource, result: AnalysisResult) -> Arc<StoredAnalysis> {
        let now = Utc::now();
        let analysis = Arc::new(StoredAnalysis {
            id: Uuid::new_v4(),
            analyzed_at: now,
            source,
            result: Arc::new(result),
        });

        let mut entries = self.entries.write().await;
        Self::remove_expired(&mut entries, now, self.ttl);
        while entries.len() >= self.max_entries {
            let Some(oldest) = Self::least_recently_used(&entries) else {
                break;
            };
            entries.remove(&oldest);
            warn!(evicted = %oldest, "Session store full, evicted least recently used analysis");
        }
        entries.insert(
            analysis.id,
            Entry {
                analysis: Arc::clone(&analysis),
                last_access: now,
            },
        );
        analysis
    }

    /// Looks up a live result and refreshes its idle timer.
    pub async fn get(&self, id: Uuid) -> Option<Arc<StoredAnalysis>> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        let expired = match entries.get_mut(&id) {
            None => return None,
            Some(entry) if now - entry.last_access >= self.ttl => true,
            Some(entry) => {
                entry.last_access = now;
                return Some(Arc::clone(&entry.analysis));
            }
        };

        if expired {
            entries.remove(&id);
        }
        None
    }

    /// Drops a result. Returns false when nothing was stored under `id`.
    pub async fn discard(&self, id: Uuid) -> bool {
        self.entries.write().await.remove(&id).is_some()
    }

    /// Removes every idle entry; returns how many were dropped.
    pub async fn sweep_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        Self::remove_expired(&mut entries, Utc::now(), self.ttl)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn least_recently_used(entries: &HashMap<Uuid, Entry>) -> Option<Uuid> {
        entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(id, _)| *id)
    }

    fn remove_expired(entries: &mut HashMap<Uuid, Entry>, now: DateTime<Utc>, ttl: Duration) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| now - entry.last_access < ttl);
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "Expired analyses dropped from session store");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::fixtures;

    #[tokio::test]
    async fn test_insert_then_get_returns_same_result() {
        let store = AnalysisStore::new(Duration::seconds(60), 100);
        let stored = store.insert(AnalysisSource::Text, fixtures::full_result()).await;

        let fetched = store.get(stored.id).await.unwrap();
        assert!(Arc::ptr_eq(&stored, &fetched));
        assert_eq!(*fetched.result, fixtures::full_result());
    }

    #[tokio::test]
    async fn test_discard_removes_result() {
        let store = AnalysisStore::new(Duration::seconds(60), 100);
        let stored = store.insert(AnalysisSource::Text, fixtures::full_result()).await;

        assert!(store.discard(stored.id).await);
        assert!(store.get(stored.id).await.is_none());
        assert!(!store.discard(stored.id).await);
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let store = AnalysisStore::new(Duration::seconds(60), 100);
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_entries_are_dropped() {
        let store = AnalysisStore::new(Duration::zero(), 100);
        let stored = store.insert(AnalysisSource::Text, fixtures::full_result()).await;

        assert!(store.get(stored.id).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_sweep_keeps_live_entries() {
        let store = AnalysisStore::new(Duration::seconds(60), 100);
        store.insert(AnalysisSource::Text, fixtures::full_result()).await;
        assert_eq!(store.sweep_expired().await, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_full_store_evicts_least_recently_used() {
        let pause = || tokio::time::sleep(std::time::Duration::from_millis(2));
        let store = AnalysisStore::new(Duration::seconds(60), 2);

        let first = store.insert(AnalysisSource::Text, fixtures::full_result()).await;
        pause().await;
        let second = store.insert(AnalysisSource::Text, fixtures::full_result()).await;
        pause().await;
        // reading refreshes `first`, leaving `second` as the oldest
        assert!(store.get(first.id).await.is_some());
        pause().await;
        let third = store.insert(AnalysisSource::Text, fixtures::full_result()).await;

        assert_eq!(store.len().await, 2);
        assert!(store.get(second.id).await.is_none());
        assert!(store.get(first.id).await.is_some());
        assert!(store.get(third.id).await.is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_still_keeps_latest() {
        let store = AnalysisStore::new(Duration::seconds(60), 0);
        store.insert(AnalysisSource::Text, fixtures::full_result()).await;
        let latest = store.insert(AnalysisSource::Text, fixtures::full_result()).await;

        assert_eq!(store.len().await, 1);
        assert!(store.get(latest.id).await.is_some());
    }

    #[test]
    fn test_source_serialization() {
        let source = AnalysisSource::File {
            file_name: Some("cv.pdf".to_string()),
            file_kind: FileKind::Pdf,
        };
        let value = serde_json::to_value(&source).unwrap();
        assert_eq!(value["type"], "file");
        assert_eq!(value["fileName"], "cv.pdf");
        assert_eq!(value["fileKind"], "pdf");
    }
}
