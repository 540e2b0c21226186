//! Album search and query inspection endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkUrls;
use crate::error::ApiResult;
use crate::models::Album;
use crate::orchestrator::{SearchStatus, StrategyReport};
use crate::query_parser::ParsedQuery;
use crate::AppState;

/// Query parameters for album search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query; missing is treated as blank
    #[serde(default)]
    pub q: String,

    /// Result cap; defaults to `search.default_limit`, capped at `search.max_limit`
    pub limit: Option<usize>,
}

/// Album plus resolved artwork URLs
#[derive(Debug, Serialize)]
pub struct AlbumView {
    #[serde(flatten)]
    pub album: Album,
    pub artwork: ArtworkUrls,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub limit: usize,
    pub status: SearchStatus,
    pub early_stopped: bool,
    pub strategies: Vec<StrategyReport>,
    pub albums: Vec<AlbumView>,
}

/// GET /api/search?q=TEXT&limit=N
///
/// An unreachable backend is still 200 with `status: backend_unavailable`;
/// only a malformed query string (e.g. non-numeric `limit`) is a 400.
pub async fn search_albums(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Query(params) = params?;
    let limit = params
        .limit
        .unwrap_or(state.search_config.default_limit)
        .min(state.search_config.max_limit);

    let outcome = state.orchestrator.search(&params.q, limit).await;

    let albums = outcome
        .albums
        .into_iter()
        .map(|album| AlbumView {
            artwork: state.artwork.artwork_for(&album.image_refs),
            album,
        })
        .collect();

    Ok(Json(SearchResponse {
        query: params.q,
        limit,
        status: outcome.status,
        early_stopped: outcome.early_stopped,
        strategies: outcome.strategies,
        albums,
    }))
}

/// Query parameters for parse inspection
#[derive(Debug, Deserialize)]
pub struct ParseParams {
    #[serde(default)]
    pub q: String,
}

/// GET /api/parse?q=TEXT
///
/// Shows how a query would be interpreted without calling the backend.
pub async fn parse_query(
    State(state): State<AppState>,
    params: Result<Query<ParseParams>, QueryRejection>,
) -> ApiResult<Json<ParsedQuery>> {
    let Query(params) = params?;
    Ok(Json(state.orchestrator.parser().parse(&params.q)))
}
