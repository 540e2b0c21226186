//! Multi-strategy album search
//!
//! Public entry point of the pipeline: parse once, run strategies in order
//! until one is confident and large enough, merge what was found, truncate.
//!
//! Strategies run strictly one after another because the decision to run
//! strategy `i + 1` depends on the outcome of strategy `i`. Independent
//! calls to [`SearchOrchestrator::search`] share nothing but the backend.

use crate::aggregator::aggregate;
use crate::backend::MetadataBackend;
use crate::executor::{SearchResult, StrategyExecutor, StrategyOutcome};
use crate::models::Album;
use crate::query_parser::QueryParser;
use crate::strategy::SearchStrategy;
use albumeo_common::config::SearchConfig;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Stop once a strategy is at least this confident and this productive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarlyStopPolicy {
    pub min_confidence: f64,
    pub min_candidates: usize,
}

impl Default for EarlyStopPolicy {
    fn default() -> Self {
        Self {
            min_confidence: 0.8,
            min_candidates: 5,
        }
    }
}

impl EarlyStopPolicy {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            min_confidence: config.early_stop_confidence,
            min_candidates: config.early_stop_min_results,
        }
    }

    pub fn should_stop(&self, result: &SearchResult) -> bool {
        result.confidence >= self.min_confidence && result.candidates.len() >= self.min_candidates
    }
}

/// Overall result classification
///
/// Lets callers tell "nothing matched" apart from "the backend could not be
/// reached", which a bare album list cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Matched,
    NoMatches,
    /// Every strategy that called the backend failed
    BackendUnavailable,
    /// Blank query; backend not called
    EmptyQuery,
}

/// Per-strategy summary of one search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyReport {
    pub strategy: SearchStrategy,
    pub confidence: f64,
    pub candidates: usize,
    pub outcome: StrategyOutcome,
}

impl From<&SearchResult> for StrategyReport {
    fn from(result: &SearchResult) -> Self {
        Self {
            strategy: result.strategy,
            confidence: result.confidence,
            candidates: result.candidates.len(),
            outcome: result.outcome.clone(),
        }
    }
}

/// Ranked albums plus how they were found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    /// Strategies that ran, in execution order
    pub strategies: Vec<StrategyReport>,
    pub early_stopped: bool,
    /// At most `limit` albums, pairwise-distinct ids, best first
    pub albums: Vec<Album>,
}

impl SearchOutcome {
    fn empty(status: SearchStatus) -> Self {
        Self {
            status,
            strategies: Vec::new(),
            early_stopped: false,
            albums: Vec::new(),
        }
    }
}

pub struct SearchOrchestrator {
    parser: QueryParser,
    executor: StrategyExecutor,
    early_stop: EarlyStopPolicy,
}

impl SearchOrchestrator {
    pub fn new(parser: QueryParser, executor: StrategyExecutor, early_stop: EarlyStopPolicy) -> Self {
        Self {
            parser,
            executor,
            early_stop,
        }
    }

    /// Default parser and early-stop thresholds over the given backend
    pub fn with_backend(backend: Arc<dyn MetadataBackend>) -> Self {
        Self::new(
            QueryParser::new(),
            StrategyExecutor::new(backend),
            EarlyStopPolicy::default(),
        )
    }

    pub fn from_config(backend: Arc<dyn MetadataBackend>, config: &SearchConfig) -> Self {
        Self::new(
            QueryParser::new(),
            StrategyExecutor::new(backend),
            EarlyStopPolicy::from_config(config),
        )
    }

    pub fn parser(&self) -> &QueryParser {
        &self.parser
    }

    /// Ranked, deduplicated albums for `raw_query`; never fails
    ///
    /// Returns an empty list both when nothing matched and when the backend
    /// was unreachable; use [`SearchOrchestrator::search`] to tell them apart.
    pub async fn search_albums(&self, raw_query: &str, limit: usize) -> Vec<Album> {
        self.search(raw_query, limit).await.albums
    }

    /// Full search with per-strategy reporting
    pub async fn search(&self, raw_query: &str, limit: usize) -> SearchOutcome {
        if raw_query.trim().is_empty() {
            return SearchOutcome::empty(SearchStatus::EmptyQuery);
        }
        if limit == 0 {
            return SearchOutcome::empty(SearchStatus::NoMatches);
        }

        let parsed = self.parser.parse(raw_query);
        debug!(
            query = %raw_query,
            terms = ?parsed.terms,
            title = ?parsed.possible_title,
            artist = ?parsed.possible_artist,
            strategies = parsed.search_strategies.len(),
            "Query parsed"
        );

        let mut recorded: Vec<SearchResult> = Vec::new();
        let mut reports = Vec::with_capacity(parsed.search_strategies.len());
        let mut early_stopped = false;

        for &strategy in &parsed.search_strategies {
            let result = self.executor.execute(&parsed, strategy, limit).await;
            reports.push(StrategyReport::from(&result));

            let stop = self.early_stop.should_stop(&result);
            if !result.candidates.is_empty() {
                recorded.push(result);
            }

            if stop {
                debug!(strategy = %strategy, "Early stop: skipping remaining strategies");
                early_stopped = true;
                break;
            }
        }

        let mut albums = aggregate(&recorded);
        albums.truncate(limit);

        let status = classify(&albums, &reports);

        info!(
            query = %raw_query,
            results = albums.len(),
            strategies_run = reports.len(),
            early_stopped,
            status = ?status,
            "Album search complete"
        );

        SearchOutcome {
            status,
            strategies: reports,
            early_stopped,
            albums,
        }
    }
}

fn classify(albums: &[Album], reports: &[StrategyReport]) -> SearchStatus {
    if !albums.is_empty() {
        return SearchStatus::Matched;
    }

    let mut reached_backend = reports
        .iter()
        .filter(|r| r.outcome != StrategyOutcome::Inapplicable)
        .peekable();

    if reached_backend.peek().is_some()
        && reached_backend.all(|r| matches!(r.outcome, StrategyOutcome::BackendFailed { .. }))
    {
        SearchStatus::BackendUnavailable
    } else {
        SearchStatus::NoMatches
    }
}
