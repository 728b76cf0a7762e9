//! Product accessors.

use serde_json::json;
use serde_json::Value;

use super::{ReadOptions, ResourceResult, RestGateway, WriteResult};
use crate::domain::gateway::Resource;
use crate::domain::transport::HttpMethod;

impl RestGateway {
    pub async fn products(&self, options: ReadOptions) -> ResourceResult {
        self.read_list(Resource::Products, options).await
    }

    pub async fn product(&self, id: &str, options: ReadOptions) -> ResourceResult {
        self.read_entity(Resource::Products, id, options).await
    }

    /// Ask the remote platform to crawl a page and import its products.
    pub async fn fetch_product(&self, fetch_url: &str) -> WriteResult {
        self.write(
            Resource::Products,
            HttpMethod::Post,
            Resource::Products.path().to_string(),
            Some(json!({ "fetchUrl": fetch_url })),
            201,
        )
        .await
    }

    pub async fn update_product(&self, id: &str, product: Value) -> WriteResult {
        self.write(
            Resource::Products,
            HttpMethod::Put,
            Resource::Products.entity_path(id),
            Some(product),
            200,
        )
        .await
    }

    /// Archive a product. The remote platform keeps its sales history.
    pub async fn delete_product(&self, id: &str) -> WriteResult {
        self.write(
            Resource::Products,
            HttpMethod::Delete,
            Resource::Products.entity_path(id),
            None,
            204,
        )
        .await
    }
}
