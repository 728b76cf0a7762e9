//! Transport domain types: request descriptors and result envelopes.

mod envelope;
mod request;

pub use envelope::{Envelope, NOT_CONFIGURED_ERROR};
pub use request::{HttpMethod, RequestDescriptor};

/// Envelopes keyed by request URL, as returned by a batch.
pub type BatchResults = std::collections::HashMap<String, Envelope<String>>;
