//! Customer accessors.

use super::{ReadOptions, ResourceResult, RestGateway};
use crate::domain::gateway::Resource;

impl RestGateway {
    pub async fn customers(&self, options: ReadOptions) -> ResourceResult {
        self.read_list(Resource::Customers, options).await
    }

    pub async fn customer(&self, id: &str, options: ReadOptions) -> ResourceResult {
        self.read_entity(Resource::Customers, id, options).await
    }

    /// Orders placed by one customer.
    pub async fn customer_orders(&self, id: &str, options: ReadOptions) -> ResourceResult {
        let path = format!("{}/orders", Resource::Customers.entity_path(id));
        self.read(Resource::Customers.cache_namespace(), path, &[], options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::gateway_with;
    use super::*;
    use crate::adapters::transport::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn customer_orders_have_no_query() {
        let transport = Arc::new(MockTransport::new().with_json("/customers/c1/orders", 200, json!([])));
        let gateway = gateway_with(transport.clone());

        let result = gateway
            .customer_orders("c1", ReadOptions::new().with_filter("limit", "5"))
            .await;

        assert_eq!(result.key, "customers/c1/orders");
        assert_eq!(transport.requests()[0].url, "https://api.test/api/customers/c1/orders");
    }

    #[tokio::test]
    async fn customers_accept_email_filter() {
        let transport = Arc::new(MockTransport::new().with_json("/customers", 200, json!({})));
        let gateway = gateway_with(transport.clone());

        gateway
            .customers(ReadOptions::new().with_filter("email", "a@b.test"))
            .await;

        assert_eq!(
            transport.requests()[0].url,
            "https://api.test/api/customers?email=a%40b.test&limit=20&offset=0"
        );
    }
}
