//! Abandoned cart accessors.

use super::{ReadOptions, ResourceResult, RestGateway};
use crate::domain::gateway::Resource;

impl RestGateway {
    /// Abandoned carts are paged with a continuation token, not an offset.
    pub async fn abandoned_carts(&self, options: ReadOptions) -> ResourceResult {
        self.read_list(Resource::AbandonedCarts, options).await
    }

    pub async fn abandoned_cart(&self, id: &str, options: ReadOptions) -> ResourceResult {
        self.read_entity(Resource::AbandonedCarts, id, options).await
    }
}
