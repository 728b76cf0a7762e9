//! Domain layer containing the integration's core types.
//!
//! # Module Organization
//!
//! - `transport` - Request descriptors and result envelopes
//! - `gateway` - Remote resources, query option rules and cache segment keys
//! - `webhook` - Webhook events, payload validation and tax calculation

pub mod gateway;
pub mod transport;
pub mod webhook;
