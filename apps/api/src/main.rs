mod config;
mod errors;
mod llm_client;
mod models;
mod report;
mod routes;
mod settings;
mod state;
mod template;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::settings::store::SettingsStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Physiotherapie Abschlussbericht API v{}", env!("CARGO_PKG_VERSION"));

    // Admin settings live in a flat JSON file, read at call time
    let settings = SettingsStore::new(config.settings_path.clone());
    info!("Settings store: {}", config.settings_path.display());

    // Single upstream client for report generation and the proxy route
    let llm = LlmClient::new(config.openrouter_url.clone());
    info!("LLM client initialized ({})", config.openrouter_url);

    if config.openrouter_api_key.is_none() {
        warn!("OPENROUTER_API_KEY not set; the proxy route will answer with a configuration error");
    }

    let state = AppState { llm, settings, config: config.clone() };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // browser form and admin panel are served cross-origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
