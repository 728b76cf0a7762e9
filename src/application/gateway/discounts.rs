//! Discount accessors.

use serde_json::Value;

use super::{ReadOptions, ResourceResult, RestGateway, WriteResult};
use crate::domain::gateway::Resource;
use crate::domain::transport::HttpMethod;

impl RestGateway {
    pub async fn discounts(&self, options: ReadOptions) -> ResourceResult {
        self.read_list(Resource::Discounts, options).await
    }

    pub async fn discount(&self, id: &str, options: ReadOptions) -> ResourceResult {
        self.read_entity(Resource::Discounts, id, options).await
    }

    pub async fn create_discount(&self, discount: Value) -> WriteResult {
        self.write(
            Resource::Discounts,
            HttpMethod::Post,
            Resource::Discounts.path().to_string(),
            Some(discount),
            201,
        )
        .await
    }

    pub async fn update_discount(&self, id: &str, discount: Value) -> WriteResult {
        self.write(
            Resource::Discounts,
            HttpMethod::Put,
            Resource::Discounts.entity_path(id),
            Some(discount),
            200,
        )
        .await
    }

    pub async fn delete_discount(&self, id: &str) -> WriteResult {
        self.write(
            Resource::Discounts,
            HttpMethod::Delete,
            Resource::Discounts.entity_path(id),
            None,
            204,
        )
        .await
    }
}
