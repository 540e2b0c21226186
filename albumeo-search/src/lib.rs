//! albumeo-search library - multi-strategy album search
//!
//! Turns a free-text query into a ranked, deduplicated album list by parsing
//! it into title/artist guesses, running several MusicBrainz search strategies
//! and merging their results.

use std::sync::Arc;

use albumeo_common::config::SearchConfig;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod aggregator;
pub mod api;
pub mod artwork;
pub mod backend;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod musicbrainz;
pub mod orchestrator;
pub mod query_parser;
pub mod strategy;
pub mod transform;

pub use artwork::CoverArtResolver;
pub use backend::MetadataBackend;
pub use models::Album;
pub use orchestrator::{SearchOrchestrator, SearchOutcome, SearchStatus};
pub use query_parser::{ParsedQuery, QueryParser};
pub use strategy::SearchStrategy;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SearchOrchestrator>,
    pub artwork: Arc<CoverArtResolver>,
    /// Limit defaults and caps for `/api/search`
    pub search_config: SearchConfig,
}

impl AppState {
    pub fn new(
        orchestrator: SearchOrchestrator,
        artwork: CoverArtResolver,
        search_config: SearchConfig,
    ) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            artwork: Arc::new(artwork),
            search_config,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/search", get(api::search_albums))
        .route("/api/parse", get(api::parse_query))
        .route("/api/artwork/:release_id", get(api::get_artwork));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
