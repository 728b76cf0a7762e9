//! Subscription accessors.

use super::{ReadOptions, ResourceResult, RestGateway, WriteResult};
use crate::domain::gateway::Resource;
use crate::domain::transport::HttpMethod;

impl RestGateway {
    pub async fn subscriptions(&self, options: ReadOptions) -> ResourceResult {
        self.read_list(Resource::Subscriptions, options).await
    }

    pub async fn subscription(&self, id: &str, options: ReadOptions) -> ResourceResult {
        self.read_entity(Resource::Subscriptions, id, options).await
    }

    pub async fn subscription_invoices(&self, id: &str, options: ReadOptions) -> ResourceResult {
        let path = format!("{}/invoices", Resource::Subscriptions.entity_path(id));
        self.read(Resource::Subscriptions.cache_namespace(), path, &[], options)
            .await
    }

    pub async fn pause_subscription(&self, id: &str) -> WriteResult {
        self.subscription_action(id, "pause").await
    }

    pub async fn resume_subscription(&self, id: &str) -> WriteResult {
        self.subscription_action(id, "resume").await
    }

    pub async fn cancel_subscription(&self, id: &str) -> WriteResult {
        self.write(
            Resource::Subscriptions,
            HttpMethod::Delete,
            Resource::Subscriptions.entity_path(id),
            None,
            204,
        )
        .await
    }

    async fn subscription_action(&self, id: &str, action: &str) -> WriteResult {
        self.write(
            Resource::Subscriptions,
            HttpMethod::Post,
            format!("{}/{}", Resource::Subscriptions.entity_path(id), action),
            None,
            200,
        )
        .await
    }
}
