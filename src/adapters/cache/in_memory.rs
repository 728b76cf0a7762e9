//! In-memory cache store.
//!
//! Process-wide map of segment keys to entries. Expired entries are pruned
//! when read and swept on every write, so segments that are never read
//! again do not accumulate.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::gateway::SegmentKey;
use crate::ports::{CacheEntry, CacheStore};

/// `CacheStore` backed by a shared `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCacheStore {
    entries: Arc<RwLock<HashMap<SegmentKey, CacheEntry>>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Whether a segment is stored, regardless of expiry.
    pub async fn contains(&self, key: &SegmentKey) -> bool {
        self.entries.read().await.contains_key(key)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &SegmentKey) -> Option<Value> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Re-check under the write lock; a writer may have refreshed it
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired_at(now)) {
            entries.remove(key);
            tracing::trace!(target: "rest_gateway", segment = %key, "Pruned expired cache entry");
        }
        None
    }

    async fn put(&self, key: &SegmentKey, value: Value, ttl: Duration) {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let swept = before - entries.len();
        if swept > 0 {
            tracing::trace!(target: "rest_gateway", swept, "Swept expired cache entries");
        }

        entries.insert(key.clone(), CacheEntry::new(value, ttl));
    }

    async fn remove(&self, key: &SegmentKey) {
        self.entries.write().await.remove(key);
    }

    async fn remove_namespace(&self, namespace: &str) {
        self.entries
            .write()
            .await
            .retain(|key, _| key.namespace() != namespace);
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
