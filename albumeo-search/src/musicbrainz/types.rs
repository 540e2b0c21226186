//! MusicBrainz WS/2 JSON response types
//!
//! Only the fields the search pipeline reads are modelled. Optional arrays
//! default to empty so partial responses still deserialize.

use serde::{Deserialize, Serialize};

/// MusicBrainz release (album edition)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MBRelease {
    /// Release MBID
    pub id: String,
    /// Release title
    pub title: String,
    /// Artist credits, primary artist first
    #[serde(rename = "artist-credit", default)]
    pub artist_credit: Vec<MBArtistCredit>,
    /// Release date (YYYY, YYYY-MM or YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
}

/// MusicBrainz recording (a track as performed)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MBRecording {
    /// Recording MBID
    pub id: String,
    /// Recording title
    pub title: String,
    /// Length in milliseconds
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(rename = "artist-credit", default)]
    pub artist_credit: Vec<MBArtistCredit>,
    /// Releases this recording appears on, primary release first
    #[serde(default)]
    pub releases: Vec<MBReleaseRef>,
}

/// Release reference embedded in a recording
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MBReleaseRef {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// MusicBrainz artist credit
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MBArtistCredit {
    /// Display name (may differ from artist.name for collaborations)
    pub name: String,
    pub artist: MBArtist,
}

/// MusicBrainz artist
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MBArtist {
    pub id: String,
    pub name: String,
    #[serde(rename = "sort-name", default)]
    pub sort_name: Option<String>,
    #[serde(default)]
    pub disambiguation: Option<String>,
}

/// `GET /release?query=` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ReleaseSearchResponse {
    #[serde(default)]
    pub releases: Vec<MBRelease>,
}

/// `GET /recording?query=` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct RecordingSearchResponse {
    #[serde(default)]
    pub recordings: Vec<MBRecording>,
}

/// `GET /artist?query=` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct ArtistSearchResponse {
    #[serde(default)]
    pub artists: Vec<MBArtist>,
}
