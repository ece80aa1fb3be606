use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use woop_core::{AppConfig, RagflowClient};
use woop_gateway::{build_router, serve, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging Setup
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("WOOP Gateway Initializing...");

    // 2. Configuration is read once and handed down explicitly
    let config = AppConfig::from_env();

    // 3. Backend client
    let client = RagflowClient::new(config.ragflow.clone())?;
    info!(
        "RAGFlow backend: '{}' (timeout {} ms)",
        client.config().base_url,
        client.config().timeout_ms
    );

    // 4. Routes
    let state = AppState {
        client: Arc::new(client),
    };
    let app = build_router(state, &config.cors);

    // 5. Start Server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    serve(app, addr).await
}
