use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use viton_proxy::app::{AppState, create_app};
use viton_proxy::config::{Config, ProxyConfig, StorageConfig};
use viton_proxy::storage::ImageStore;
use viton_proxy::upstream::HttpUpstream;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,viton_proxy=debug".into()),
        )
        .init();

    let config = Config::parse();
    tracing::info!("Starting try-on proxy with config: {:?}", config);

    let proxy_config = ProxyConfig::from(&config);
    let storage_config = StorageConfig::from(&config);

    let upstream = HttpUpstream::new(proxy_config)?;
    let store = ImageStore::new(storage_config.upload_dir);

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = create_app(AppState::new(Arc::new(upstream), store))
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.server_address()).await?;
    tracing::info!("Server running on http://{}", config.server_address());
    tracing::info!("Forwarding try-on requests to {}", config.vton_endpoint);

    axum::serve(listener, app).await?;
    Ok(())
}
