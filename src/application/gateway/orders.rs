//! Order accessors.

use serde_json::{json, Value};

use super::{ReadOptions, ResourceResult, RestGateway, WriteResult};
use crate::domain::gateway::{Resource, PAGING_RULES};
use crate::domain::transport::HttpMethod;

impl RestGateway {
    /// `GET orders`
    pub async fn orders(&self, options: ReadOptions) -> ResourceResult {
        self.read_list(Resource::Orders, options).await
    }

    /// `GET orders/{token}`
    pub async fn order(&self, token: &str, options: ReadOptions) -> ResourceResult {
        self.read_entity(Resource::Orders, token, options).await
    }

    /// `GET orders/{token}/notifications`
    pub async fn order_notifications(&self, token: &str, options: ReadOptions) -> ResourceResult {
        let path = format!("{}/notifications", Resource::Orders.entity_path(token));
        self.read(Resource::Orders.cache_namespace(), path, PAGING_RULES, options)
            .await
    }

    /// `GET orders/{token}/refunds`
    pub async fn order_refunds(&self, token: &str, options: ReadOptions) -> ResourceResult {
        let path = format!("{}/refunds", Resource::Orders.entity_path(token));
        self.read(Resource::Orders.cache_namespace(), path, &[], options)
            .await
    }

    /// Change an order's status, optionally with a tracking number.
    pub async fn update_order_status(
        &self,
        token: &str,
        status: &str,
        tracking_number: Option<&str>,
    ) -> WriteResult {
        let mut body = json!({ "status": status });
        if let Some(tracking_number) = tracking_number {
            body["trackingNumber"] = json!(tracking_number);
        }
        self.write(
            Resource::Orders,
            HttpMethod::Put,
            Resource::Orders.entity_path(token),
            Some(body),
            200,
        )
        .await
    }

    pub async fn create_order_refund(&self, token: &str, amount: f64, comment: Option<&str>) -> WriteResult {
        let mut body = json!({ "amount": amount });
        if let Some(comment) = comment {
            body["comment"] = json!(comment);
        }
        self.write(
            Resource::Orders,
            HttpMethod::Post,
            format!("{}/refunds", Resource::Orders.entity_path(token)),
            Some(body),
            201,
        )
        .await
    }

    /// Attach a notification (comment, invoice, tracking) to an order.
    pub async fn create_order_notification(&self, token: &str, notification: Value) -> WriteResult {
        self.write(
            Resource::Orders,
            HttpMethod::Post,
            format!("{}/notifications", Resource::Orders.entity_path(token)),
            Some(notification),
            201,
        )
        .await
    }
}
