//! Application layer - batches, caching, the REST gateway and webhook handling.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod batch;
pub mod cache;
pub mod gateway;
pub mod handlers;

pub use batch::{BatchError, BatchMode, RequestBatch};
pub use cache::{Cacheable, ResponseCache};
pub use gateway::{
    DashboardPeriod, GatewayConfig, ReadOptions, ResourceResult, RestGateway, WriteFailure,
    WriteResult,
};
