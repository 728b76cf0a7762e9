//! storefront-gateway server binary.
//!
//! Loads configuration, wires the transport, cache, gateway and webhook
//! receiver, and serves the webhook endpoint.

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storefront_gateway::adapters::http::{webhook_router, WebhookAppState};
use storefront_gateway::adapters::{InMemoryCacheStore, ReqwestTransport, TransportConfig};
use storefront_gateway::application::handlers::webhook::{
    HandlerTable, ReceiveWebhookHandler, ReceiverConfig,
};
use storefront_gateway::application::{GatewayConfig, ResponseCache, RestGateway};
use storefront_gateway::config::AppConfig;
use storefront_gateway::ports::HttpTransport;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        remote = %config.remote.base_url,
        "Starting storefront-gateway"
    );
    if !config.remote.has_secret_key() {
        tracing::warn!(target: "rest_gateway", "No API key configured; remote calls will fail fast");
    }

    let transport: Arc<dyn HttpTransport> =
        Arc::new(ReqwestTransport::new(TransportConfig::from_remote(&config.remote))?);
    let cache = ResponseCache::new(Arc::new(InMemoryCacheStore::new()));

    let gateway = RestGateway::new(transport.clone(), cache, GatewayConfig::from_app(&config));
    if config.remote.has_secret_key() {
        let probe = gateway.test_connection().await;
        if !probe.is_success() {
            tracing::warn!(
                target: "rest_gateway",
                status = probe.http_code(),
                "Remote API not reachable at startup"
            );
        }
    }

    let receiver = ReceiveWebhookHandler::new(
        transport,
        HandlerTable::standard(config.taxes.clone()),
        ReceiverConfig::from_app(&config),
    );
    let state = WebhookAppState::new(receiver, config.webhook.token_header.clone());

    let app = webhook_router(&config.webhook)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!(%address, path = %config.webhook.path, "Listening for webhooks");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
