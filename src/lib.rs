//! Storefront Gateway - CMS storefront integration with a hosted e-commerce platform
//!
//! This crate talks to the platform's REST API through a cached, batched
//! transport and receives its webhooks, validating each one against the
//! platform before dispatching it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
