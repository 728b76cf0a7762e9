//! Cache store port.
//!
//! A namespaced key/value store with per-entry TTL. Values are opaque JSON
//! blobs; the store knows nothing about what they contain.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::gateway::SegmentKey;

/// A stored value with its expiry metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: serde_json::Value,
    pub ttl: Duration,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(value: serde_json::Value, ttl: Duration) -> Self {
        Self {
            value,
            ttl,
            created_at: Utc::now(),
        }
    }

    /// Whether the entry has outlived its TTL at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match (now - self.created_at).to_std() {
            Ok(elapsed) => elapsed >= self.ttl,
            // `now` precedes creation
            Err(_) => false,
        }
    }
}

/// Port for the process-wide response cache.
///
/// No locking is implied: two concurrent writers of the same segment both
/// succeed and the last one wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get an unexpired value.
    async fn get(&self, key: &SegmentKey) -> Option<serde_json::Value>;

    /// Store a value, replacing any previous entry.
    async fn put(&self, key: &SegmentKey, value: serde_json::Value, ttl: Duration);

    /// Remove one segment.
    async fn remove(&self, key: &SegmentKey);

    /// Remove every segment in a namespace.
    async fn remove_namespace(&self, namespace: &str);

    /// Remove everything.
    async fn clear(&self);
}
