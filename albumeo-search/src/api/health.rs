//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// Limit applied to `/api/search` when none is given
    pub default_limit: usize,
    /// Largest `limit` `/api/search` will honour
    pub max_limit: usize,
}

/// GET /health
///
/// Reports the effective search limits; the metadata backend is not contacted.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "albumeo-search".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_limit: state.search_config.default_limit,
        max_limit: state.search_config.max_limit,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
