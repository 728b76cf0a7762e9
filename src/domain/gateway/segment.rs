//! Cache segment keys.

use std::fmt;

use sha2::{Digest, Sha256};

use super::query::QueryOptions;

/// Identifies one cached segment: a namespace plus a key unique within it.
///
/// The key combines the resource path with a SHA-256 of the canonical query,
/// so distinct option sets never share a segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    namespace: String,
    key: String,
}

impl SegmentKey {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    /// Derive the segment for a resource path and its resolved options.
    pub fn derive(namespace: &str, path: &str, options: &QueryOptions) -> Self {
        let digest = Sha256::digest(options.canonical().as_bytes());
        Self::new(namespace, format!("{}.{}", path, hex::encode(digest)))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.key)
    }
}
