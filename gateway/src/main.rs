use anyhow::Context;
use form_gateway::{config::GatewayConfig, AppState, FORM_PATH, HEALTH_PATH, MCP_PATH};
use form_tools::Registry;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment & Logging
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    info!("Form Demo MCP Server initializing...");
    let config = GatewayConfig::from_env().context("invalid gateway configuration")?;

    // 2. Capability declarations, built once and shared read-only
    let registry = Registry::new(&config.public_dir);
    let state = AppState::new(registry);

    // 3. Routes
    let app = form_gateway::app(state, &config.public_dir);

    // 4. Start Server
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    let base = format!("http://localhost:{}", config.port);
    info!("Form Demo MCP Server running at {base}");
    info!("MCP Endpoint: {base}{MCP_PATH}");
    info!("Health Check: {base}{HEALTH_PATH}");
    info!("Form: {base}{FORM_PATH}");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("server error")?;

    Ok(())
}
