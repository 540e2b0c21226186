//! Retrieval strategies and their fixed confidence values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discount applied when the title/artist guess is tried the other way round
pub const SWAPPED_FIELDS_DISCOUNT: f64 = 0.8;

/// One interpretation of the query, from most to least specific
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Raw query text against release search
    Exact,
    /// `release:"title" AND artist:"artist"` plus the recording equivalent
    TitleArtist,
    /// [`SearchStrategy::TitleArtist`] with the two fields swapped
    ArtistTitle,
    ArtistOnly,
    TitleOnly,
    /// Raw query text against both release and recording search
    Fuzzy,
}

impl SearchStrategy {
    /// Every strategy, most specific first
    pub const ALL: [SearchStrategy; 6] = [
        SearchStrategy::Exact,
        SearchStrategy::TitleArtist,
        SearchStrategy::ArtistTitle,
        SearchStrategy::ArtistOnly,
        SearchStrategy::TitleOnly,
        SearchStrategy::Fuzzy,
    ];

    /// Confidence attached to a successful result of this strategy
    pub fn base_confidence(self) -> f64 {
        match self {
            SearchStrategy::Exact => 0.90,
            SearchStrategy::TitleArtist => 0.85,
            SearchStrategy::ArtistTitle => {
                SearchStrategy::TitleArtist.base_confidence() * SWAPPED_FIELDS_DISCOUNT
            }
            SearchStrategy::ArtistOnly => 0.70,
            SearchStrategy::TitleOnly => 0.60,
            SearchStrategy::Fuzzy => 0.40,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchStrategy::Exact => "exact",
            SearchStrategy::TitleArtist => "title_artist",
            SearchStrategy::ArtistTitle => "artist_title",
            SearchStrategy::ArtistOnly => "artist_only",
            SearchStrategy::TitleOnly => "title_only",
            SearchStrategy::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
