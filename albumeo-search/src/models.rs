//! Album and track value types produced by the search pipeline
//!
//! These are created fresh for every search and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Album candidate
///
/// `id` is the backend release MBID and the only identity that matters:
/// two albums with the same `id` are the same entity even when their other
/// fields differ (e.g. one came from a release search, one from a recording).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub artist_id: String,
    pub source_url: String,
    /// Artwork references; the first entry is the release id used for cover art lookup
    pub image_refs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// Track derived from a recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: TrackArtist,
    /// Primary release the recording appears on
    pub album: Option<TrackAlbum>,
    pub source_url: String,
    pub image_refs: Vec<String>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackAlbum {
    pub id: String,
    pub title: String,
    pub release_date: Option<String>,
}
