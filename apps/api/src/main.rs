mod config;
mod errors;
mod export;
mod host;
mod layout;
mod llm_client;
mod models;
mod pagination;
mod raster;
mod render;
mod routes;
mod state;
mod theme;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::raster::{Rasterizer, SoftwareRasterizer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on values that do not parse)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("vitae_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    let rasterizer = build_rasterizer(&config).await?;

    // Initialize LLM client when a key is configured
    let llm = match &config.ai_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.ai_api_url.clone())?;
            info!("LLM client initialized (endpoint: {})", client.api_url());
            Some(client)
        }
        None => {
            warn!("AI_API_KEY not set; writing suggestions are disabled");
            None
        }
    };

    info!(
        "Export capture: {}px wide at {}x, settle {}ms",
        config.capture_width_px, config.capture_scale, config.settle_delay_ms
    );
    if let Some(dir) = &config.export_archive_dir {
        info!("Archiving exports to {}", dir.display());
    }

    let state = AppState::new(&config, rasterizer, llm);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Software rasterizer, with glyph outlines from `FONT_PATH` when set.
async fn build_rasterizer(config: &Config) -> Result<Arc<dyn Rasterizer>> {
    let Some(path) = &config.font_path else {
        info!("FONT_PATH not set; text renders as glyph blocks");
        return Ok(Arc::new(SoftwareRasterizer::new()));
    };

    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read font file '{}'", path.display()))?;
    let rasterizer = SoftwareRasterizer::with_font_data(data)
        .with_context(|| format!("'{}' is not a usable TrueType/OpenType font", path.display()))?;
    info!("Loaded font from {}", path.display());
    Ok(Arc::new(rasterizer))
}
