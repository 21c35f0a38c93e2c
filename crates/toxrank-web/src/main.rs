//! toxrank web server
//!
//! Run with: TOXRANK_API_KEY=... cargo run -p toxrank-web

use std::sync::Arc;

use toxrank_ingestion::CompToxClient;
use toxrank_web::{config::Config, router::build_router, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("toxrank=debug,info")),
        )
        .init();

    info!("Starting toxrank web server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    let api_key = config.api_key()?;
    let client = CompToxClient::with_base_url(&config.api.base_url, api_key, config.api.timeout())?;
    info!("CompTox client ready: {}", client.base_url());

    let addr = config.server.socket_addr()?;
    let state = AppState::new(config, Arc::new(client))?;
    let app = build_router(state);

    info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
