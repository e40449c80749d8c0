mod config;
mod documents;
mod errors;
mod generation;
mod llm_client;
mod portfolio;
mod research;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Malformed env values fail here, before anything binds
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Letterpress API v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_config(config.clone())?;
    info!(
        "LLM client initialized (model: {}, host: {})",
        config.model_name, config.ollama_host
    );
    info!(
        "Research cache at {} (ttl {}s)",
        config.research_cache_dir.display(),
        config.research_cache_ttl_secs
    );

    // Generation still fails per request if the model is missing; this only warns early
    match state.llm.verify_model().await {
        Ok(true) => match state.llm.model_info().await {
            Ok(details) => info!(
                family = %details["details"]["family"],
                parameters = %details["details"]["parameter_size"],
                "Model {} is available", config.model_name
            ),
            Err(e) => warn!("Model {} is available but /api/show failed: {e}", config.model_name),
        },
        Ok(false) => warn!(
            "Model {} not found on {}; run `ollama pull {}`",
            config.model_name, config.ollama_host, config.model_name
        ),
        Err(e) => warn!("Could not reach model host {}: {e}", config.ollama_host),
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
