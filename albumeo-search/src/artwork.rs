//! Cover Art Archive URL resolution
//!
//! Albums only carry release ids in `image_refs`; this module turns those
//! into displayable URLs. Image bytes are never fetched here.

use albumeo_common::config::MusicBrainzConfig;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverArtSize {
    /// 250px thumbnail
    Small,
    /// Original upload
    Large,
}

/// Artwork URLs for one album
///
/// Display and high-res both point at the original upload; the 250px
/// thumbnail is offered separately for list views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkUrls {
    pub display_url: String,
    /// `None` when the album has no artwork reference
    pub high_res_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

pub struct CoverArtResolver {
    http_client: Client,
    base_url: String,
    placeholder_url: String,
}

impl CoverArtResolver {
    pub fn new(config: &MusicBrainzConfig) -> reqwest::Result<Self> {
        let http_client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.cover_art_base_url.trim_end_matches('/').to_string(),
            placeholder_url: config.placeholder_image_url.clone(),
        })
    }

    pub fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    /// Front cover URL for a release
    pub fn cover_art_url(&self, release_id: &str, size: CoverArtSize) -> String {
        let front = format!("{}/{}/front", self.base_url, release_id);
        match size {
            CoverArtSize::Small => format!("{}-250.jpg", front),
            CoverArtSize::Large => format!("{}.jpg", front),
        }
    }

    /// URLs for an album's `image_refs`; the first ref is the release id
    pub fn artwork_for(&self, image_refs: &[String]) -> ArtworkUrls {
        match image_refs.first() {
            Some(release_id) => ArtworkUrls {
                display_url: self.cover_art_url(release_id, CoverArtSize::Large),
                high_res_url: Some(self.cover_art_url(release_id, CoverArtSize::Large)),
                thumbnail_url: Some(self.cover_art_url(release_id, CoverArtSize::Small)),
            },
            None => ArtworkUrls {
                display_url: self.placeholder_url.clone(),
                high_res_url: None,
                thumbnail_url: None,
            },
        }
    }

    /// Whether the Cover Art Archive has any artwork for the release
    ///
    /// Any failure (network, 404, 5xx) counts as "no artwork".
    pub async fn cover_art_exists(&self, release_id: &str) -> bool {
        let url = format!("{}/{}", self.base_url, release_id);

        match self.http_client.head(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(release_id = %release_id, error = %e, "Cover art check failed");
                false
            }
        }
    }
}
