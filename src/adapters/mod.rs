//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `transport` - Outbound HTTP (reqwest, scripted mock)
//! - `cache` - Response cache storage (in-memory)
//! - `http` - Inbound webhook endpoint (axum)

pub mod cache;
pub mod http;
pub mod transport;

pub use cache::InMemoryCacheStore;
pub use transport::{MockTransport, ReqwestTransport, TransportConfig, TransportError};
