//! Outbound HTTP transport adapters.

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::MockTransport;
pub use reqwest_transport::{ReqwestTransport, TransportConfig, TransportError, DEFAULT_USER_AGENT};
