//! Application handlers.

pub mod webhook;
