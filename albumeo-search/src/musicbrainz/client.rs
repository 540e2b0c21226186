//! MusicBrainz API client
//!
//! Keyword and field-qualified search over releases, recordings and artists,
//! plus single-entity lookups.
//!
//! # API Reference
//! - Endpoint: https://musicbrainz.org/ws/2/{entity}?query=...&fmt=json
//! - Documentation: https://musicbrainz.org/doc/MusicBrainz_API/Search
//! - Rate Limit: 1 request/second (as per MusicBrainz Terms of Service)

use super::types::{
    ArtistSearchResponse, MBArtist, MBRecording, MBRelease, RecordingSearchResponse,
    ReleaseSearchResponse,
};
use crate::backend::MetadataBackend;
use albumeo_common::config::MusicBrainzConfig;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Largest page size the search endpoints accept
pub const MAX_SEARCH_LIMIT: usize = 100;

/// MusicBrainz client errors
#[derive(Debug, Error)]
pub enum MBError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// MusicBrainz API client
///
/// Cheap to share behind an `Arc`: the HTTP connection pool and the rate
/// limiter are both safe for concurrent callers, and the limiter budget is
/// shared by everyone using the same client.
pub struct MusicBrainzClient {
    http_client: Client,
    base_url: String,
    user_agent: String,
    rate_limiter: DefaultDirectRateLimiter,
}

impl MusicBrainzClient {
    /// Create a client from the `[musicbrainz]` config section
    pub fn new(config: &MusicBrainzConfig) -> Result<Self, MBError> {
        let user_agent = config.effective_user_agent();

        let http_client = Client::builder()
            .user_agent(user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| MBError::NetworkError(e.to_string()))?;

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent,
            rate_limiter: RateLimiter::direct(Quota::per_second(per_second)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Search releases by free text or field-qualified query
    pub async fn search_releases(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<MBRelease>, MBError> {
        let response: ReleaseSearchResponse = self.search("release", query, limit).await?;
        Ok(response.releases)
    }

    /// Search recordings by free text or field-qualified query
    pub async fn search_recordings(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<MBRecording>, MBError> {
        let response: RecordingSearchResponse = self.search("recording", query, limit).await?;
        Ok(response.recordings)
    }

    /// Search artists by name
    pub async fn search_artists(&self, query: &str, limit: usize) -> Result<Vec<MBArtist>, MBError> {
        let response: ArtistSearchResponse = self.search("artist", query, limit).await?;
        Ok(response.artists)
    }

    /// Lookup a release by MBID; `None` when MusicBrainz has no such release
    pub async fn lookup_release(&self, mbid: &str) -> Result<Option<MBRelease>, MBError> {
        let url = format!("{}/release/{}", self.base_url, mbid);
        let params = [
            ("inc", "artist-credits".to_string()),
            ("fmt", "json".to_string()),
        ];
        not_found_as_none(self.get_json(&url, &params).await)
    }

    /// Lookup a recording by MBID; `None` when MusicBrainz has no such recording
    pub async fn lookup_recording(&self, mbid: &str) -> Result<Option<MBRecording>, MBError> {
        let url = format!("{}/recording/{}", self.base_url, mbid);
        let params = [
            ("inc", "releases+artist-credits".to_string()),
            ("fmt", "json".to_string()),
        ];
        not_found_as_none(self.get_json(&url, &params).await)
    }

    async fn search<T: DeserializeOwned>(
        &self,
        entity: &str,
        query: &str,
        limit: usize,
    ) -> Result<T, MBError> {
        let url = format!("{}/{}", self.base_url, entity);
        let params = [
            ("query", query.to_string()),
            ("limit", clamp_limit(limit).to_string()),
            ("fmt", "json".to_string()),
        ];
        self.get_json(&url, &params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, MBError> {
        // Wait for a rate limiter permit
        self.rate_limiter.until_ready().await;

        debug!(url = %url, params = ?params, "Querying MusicBrainz API");

        let response = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| MBError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == 404 {
            return Err(MBError::NotFound(url.to_string()));
        }

        if status == 503 {
            return Err(MBError::RateLimitExceeded);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MBError::ApiError(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| MBError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl MetadataBackend for MusicBrainzClient {
    async fn search_releases(&self, query: &str, limit: usize) -> Result<Vec<MBRelease>, MBError> {
        MusicBrainzClient::search_releases(self, query, limit).await
    }

    async fn search_recordings(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<MBRecording>, MBError> {
        MusicBrainzClient::search_recordings(self, query, limit).await
    }
}

/// Search endpoints accept 1..=100 results per page
fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_SEARCH_LIMIT)
}

fn not_found_as_none<T>(result: Result<T, MBError>) -> Result<Option<T>, MBError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(MBError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn test_config() -> MusicBrainzConfig {
        MusicBrainzConfig {
            user_agent: Some("TestApp/1.0 (test@example.com)".to_string()),
            ..MusicBrainzConfig::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let client = MusicBrainzClient::new(&test_config()).unwrap();
        assert_eq!(client.user_agent(), "TestApp/1.0 (test@example.com)");
        assert!(client.base_url().contains("musicbrainz.org"));
        assert!(client.base_url().ends_with("/ws/2"));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = MusicBrainzConfig {
            base_url: "http://localhost:5000/ws/2/".to_string(),
            ..test_config()
        };
        let client = MusicBrainzClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/ws/2");
    }

    #[test]
    fn test_limit_clamped_to_service_range() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(12), 12);
        assert_eq!(clamp_limit(500), MAX_SEARCH_LIMIT);
    }

    #[test]
    fn test_not_found_maps_to_none() {
        let missing: Result<u8, MBError> = Err(MBError::NotFound("x".to_string()));
        assert!(matches!(not_found_as_none(missing), Ok(None)));

        let failed: Result<u8, MBError> = Err(MBError::RateLimitExceeded);
        assert!(not_found_as_none(failed).is_err());
    }

    #[tokio::test]
    async fn test_rate_limiter_enforces_one_per_second() {
        let client = MusicBrainzClient::new(&test_config()).unwrap();

        // First permit is immediate
        let start = Instant::now();
        client.rate_limiter.until_ready().await;
        assert!(start.elapsed().as_millis() < 100);

        // Second permit waits for the bucket to refill
        let start = Instant::now();
        client.rate_limiter.until_ready().await;
        assert!(
            start.elapsed().as_millis() >= 900,
            "Second request should wait ~1 second, took {:?}",
            start.elapsed()
        );
    }
}
