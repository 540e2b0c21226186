//! Strategy execution
//!
//! Builds the backend query for one strategy, runs it, converts releases and
//! recordings into album candidates and tags the result with the strategy's
//! confidence. Backend failures never escape: they come back as an empty,
//! zero-confidence [`SearchResult`] so the orchestrator can keep going.

use crate::backend::MetadataBackend;
use crate::models::Album;
use crate::musicbrainz::{MBError, MBRecording, MBRelease};
use crate::query_parser::ParsedQuery;
use crate::strategy::{SearchStrategy, SWAPPED_FIELDS_DISCOUNT};
use crate::transform::{dedup_by_id, escape_query_value, recordings_to_albums, releases_to_albums};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// How a strategy run ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyOutcome {
    /// Backend answered (possibly with nothing)
    Completed,
    /// Required field missing; backend not called
    Inapplicable,
    /// Backend call failed
    BackendFailed { error: String },
}

/// Candidates produced by one strategy
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Deduplicated by id, in backend relevance order
    pub candidates: Vec<Album>,
    pub strategy: SearchStrategy,
    pub confidence: f64,
    pub outcome: StrategyOutcome,
}

impl SearchResult {
    fn inapplicable(strategy: SearchStrategy) -> Self {
        Self {
            candidates: Vec::new(),
            strategy,
            confidence: 0.0,
            outcome: StrategyOutcome::Inapplicable,
        }
    }

    fn from_backend(strategy: SearchStrategy, result: Result<Vec<Album>, MBError>) -> Self {
        match result {
            Ok(candidates) => Self {
                candidates,
                strategy,
                confidence: strategy.base_confidence(),
                outcome: StrategyOutcome::Completed,
            },
            Err(e) => {
                warn!(strategy = %strategy, error = %e, "Backend search failed");
                Self {
                    candidates: Vec::new(),
                    strategy,
                    confidence: 0.0,
                    outcome: StrategyOutcome::BackendFailed {
                        error: e.to_string(),
                    },
                }
            }
        }
    }
}

/// Runs individual strategies against an injected backend
#[derive(Clone)]
pub struct StrategyExecutor {
    backend: Arc<dyn MetadataBackend>,
}

impl StrategyExecutor {
    pub fn new(backend: Arc<dyn MetadataBackend>) -> Self {
        Self { backend }
    }

    /// Run one strategy; never fails
    pub async fn execute(
        &self,
        parsed: &ParsedQuery,
        strategy: SearchStrategy,
        limit: usize,
    ) -> SearchResult {
        let result = match strategy {
            SearchStrategy::Exact => self.exact(parsed, limit).await,
            SearchStrategy::TitleArtist => self.title_artist(parsed, limit).await,
            SearchStrategy::ArtistTitle => self.artist_title(parsed, limit).await,
            SearchStrategy::ArtistOnly => self.artist_only(parsed, limit).await,
            SearchStrategy::TitleOnly => self.title_only(parsed, limit).await,
            SearchStrategy::Fuzzy => self.fuzzy(parsed, limit).await,
        };

        debug!(
            strategy = %strategy,
            candidates = result.candidates.len(),
            confidence = result.confidence,
            "Strategy executed"
        );

        result
    }

    async fn exact(&self, parsed: &ParsedQuery, limit: usize) -> SearchResult {
        let releases = self.backend.search_releases(&parsed.original, limit).await;
        SearchResult::from_backend(
            SearchStrategy::Exact,
            releases.map(|r| releases_to_albums(&r)),
        )
    }

    async fn title_artist(&self, parsed: &ParsedQuery, limit: usize) -> SearchResult {
        let (Some(title), Some(artist)) = (
            field(&parsed.possible_title),
            field(&parsed.possible_artist),
        ) else {
            return SearchResult::inapplicable(SearchStrategy::TitleArtist);
        };

        let title = escape_query_value(title);
        let artist = escape_query_value(artist);
        let release_query = format!("release:\"{}\" AND artist:\"{}\"", title, artist);
        let recording_query = format!("recording:\"{}\" AND artist:\"{}\"", title, artist);

        let (releases, recordings) = tokio::join!(
            self.backend.search_releases(&release_query, limit),
            self.backend.search_recordings(&recording_query, limit),
        );

        SearchResult::from_backend(
            SearchStrategy::TitleArtist,
            merge_candidates(releases, recordings),
        )
    }

    /// Title/artist guess the other way round, trusted a little less
    async fn artist_title(&self, parsed: &ParsedQuery, limit: usize) -> SearchResult {
        let result = self.title_artist(&parsed.swapped(), limit).await;

        SearchResult {
            strategy: SearchStrategy::ArtistTitle,
            confidence: result.confidence * SWAPPED_FIELDS_DISCOUNT,
            ..result
        }
    }

    async fn artist_only(&self, parsed: &ParsedQuery, limit: usize) -> SearchResult {
        let Some(artist) = field(&parsed.possible_artist) else {
            return SearchResult::inapplicable(SearchStrategy::ArtistOnly);
        };

        let query = format!("artist:\"{}\"", escape_query_value(artist));
        let releases = self.backend.search_releases(&query, limit).await;
        SearchResult::from_backend(
            SearchStrategy::ArtistOnly,
            releases.map(|r| releases_to_albums(&r)),
        )
    }

    async fn title_only(&self, parsed: &ParsedQuery, limit: usize) -> SearchResult {
        let Some(title) = field(&parsed.possible_title) else {
            return SearchResult::inapplicable(SearchStrategy::TitleOnly);
        };

        let query = format!("release:\"{}\"", escape_query_value(title));
        let releases = self.backend.search_releases(&query, limit).await;
        SearchResult::from_backend(
            SearchStrategy::TitleOnly,
            releases.map(|r| releases_to_albums(&r)),
        )
    }

    async fn fuzzy(&self, parsed: &ParsedQuery, limit: usize) -> SearchResult {
        let half = limit / 2;

        let (releases, recordings) = tokio::join!(
            self.backend.search_releases(&parsed.original, half),
            self.backend.search_recordings(&parsed.original, half),
        );

        SearchResult::from_backend(SearchStrategy::Fuzzy, merge_candidates(releases, recordings))
    }
}

/// Set, non-blank field value
fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Release-derived albums followed by recording-derived ones, first id wins
fn merge_candidates(
    releases: Result<Vec<MBRelease>, MBError>,
    recordings: Result<Vec<MBRecording>, MBError>,
) -> Result<Vec<Album>, MBError> {
    let mut albums = releases_to_albums(&releases?);
    albums.extend(recordings_to_albums(&recordings?));
    Ok(dedup_by_id(albums))
}
