//! Response cache configuration

use std::time::Duration;

use serde::Deserialize;

/// Response cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// TTL applied when a read does not specify one; 0 disables caching
    #[serde(default = "default_ttl")]
    pub default_ttl_secs: u64,
}

impl CacheConfig {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}
