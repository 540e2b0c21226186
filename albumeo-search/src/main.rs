//! albumeo-search - album search HTTP service
//!
//! Serves `/api/search`, `/api/parse`, `/api/artwork/:release_id` and
//! `/health` on top of the MusicBrainz search pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use albumeo_common::config::load_config;
use albumeo_search::logging::init_tracing;
use albumeo_search::musicbrainz::MusicBrainzClient;
use albumeo_search::{build_router, AppState, CoverArtResolver, SearchOrchestrator};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

/// Command-line arguments for albumeo-search
#[derive(Parser, Debug)]
#[command(name = "albumeo-search")]
#[command(about = "Multi-strategy album search service")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides server.host)
    #[arg(long, env = "ALBUMEO_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long, env = "ALBUMEO_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(
        "Starting Albumeo search service (albumeo-search) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let client = MusicBrainzClient::new(&config.musicbrainz)
        .context("Failed to create MusicBrainz client")?;
    info!(
        "MusicBrainz: {} ({} req/s)",
        client.base_url(),
        config.musicbrainz.requests_per_second
    );

    let artwork = CoverArtResolver::new(&config.musicbrainz)
        .context("Failed to create cover art resolver")?;
    let orchestrator = SearchOrchestrator::from_config(Arc::new(client), &config.search);

    let state = AppState::new(orchestrator, artwork, config.search.clone());
    let app = build_router(state);

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("albumeo-search listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
