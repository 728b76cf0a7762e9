//! Response cache.
//!
//! Get-or-compute over a `CacheStore`. Values are stored as JSON and read
//! back into the caller's type, so a hit returns exactly what was computed.
//!
//! There is no coordination between concurrent misses: two callers missing
//! the same segment both run their compute function and the last write wins.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::gateway::SegmentKey;
use crate::domain::transport::{BatchResults, Envelope};
use crate::ports::CacheStore;

/// A value the response cache knows how to store.
pub trait Cacheable: Serialize + DeserializeOwned {
    /// Whether this value may be stored. Failures are never cached.
    fn is_cacheable(&self) -> bool;
}

impl<T> Cacheable for Envelope<T>
where
    T: Serialize + DeserializeOwned,
{
    fn is_cacheable(&self) -> bool {
        self.is_success()
    }
}

impl Cacheable for BatchResults {
    fn is_cacheable(&self) -> bool {
        self.values().all(Envelope::is_success)
    }
}

/// Namespaced, TTL-based response cache.
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Return the cached value for `key`, or compute and store it.
    ///
    /// A zero `ttl` computes without storing.
    pub async fn get_or_compute<T, F, Fut>(&self, key: &SegmentKey, ttl: Duration, compute: F) -> T
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(stored) = self.store.get(key).await {
            match serde_json::from_value::<T>(stored) {
                Ok(value) => {
                    tracing::debug!(target: "rest_gateway", segment = %key, "Cache hit");
                    return value;
                }
                Err(e) => {
                    tracing::warn!(target: "rest_gateway", segment = %key, error = %e, "Discarding unreadable cache entry");
                    self.store.remove(key).await;
                }
            }
        }

        tracing::debug!(target: "rest_gateway", segment = %key, "Cache miss");
        let value = compute().await;

        if ttl.is_zero() || !value.is_cacheable() {
            return value;
        }

        match serde_json::to_value(&value) {
            Ok(json) => self.store.put(key, json, ttl).await,
            Err(e) => {
                tracing::warn!(target: "rest_gateway", segment = %key, error = %e, "Could not serialize value for cache");
            }
        }
        value
    }

    /// Remove one segment.
    pub async fn invalidate(&self, key: &SegmentKey) {
        tracing::debug!(target: "rest_gateway", segment = %key, "Invalidating segment");
        self.store.remove(key).await;
    }

    /// Remove every segment in a namespace.
    pub async fn invalidate_namespace(&self, namespace: &str) {
        tracing::debug!(target: "rest_gateway", namespace = %namespace, "Invalidating namespace");
        self.store.remove_namespace(namespace).await;
    }

    /// Remove every segment of every namespace.
    pub async fn reset_all(&self) {
        tracing::info!(target: "rest_gateway", "Clearing response cache");
        self.store.clear().await;
    }
}
