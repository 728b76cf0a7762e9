//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the gateway and the outside world. Adapters implement these ports.
//!
//! - `HttpTransport` - outbound HTTP calls to the remote platform
//! - `CacheStore` - namespaced TTL storage for decoded responses

mod cache_store;
mod http_transport;

pub use cache_store::{CacheEntry, CacheStore};
pub use http_transport::HttpTransport;
