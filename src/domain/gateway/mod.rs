//! Gateway domain: resources, query options and cache segment keys.

mod query;
mod resource;
mod segment;

pub use query::{FilterOptions, QueryOptions};
pub use resource::{OptionRule, Resource, PAGING_RULES};
pub use segment::SegmentKey;
