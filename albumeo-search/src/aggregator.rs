//! Confidence and position weighted merging of strategy results
//!
//! Every candidate gets `confidence × position_score`, where
//! `position_score = 1 − (p / N) × 0.3` for zero-based position `p` in a
//! result set of size `N`. Each album id keeps its best score; the output is
//! sorted by score with ties left in first-discovery order.

use crate::executor::SearchResult;
use crate::models::Album;
use serde::Serialize;
use std::collections::HashMap;

/// Share of the score a candidate can lose by ranking last in its set
const POSITION_WEIGHT: f64 = 0.3;

/// Album with its merged ranking score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredAlbum {
    pub album: Album,
    pub score: f64,
}

/// `1 − (position / set_size) × 0.3`, in (0.7, 1.0]
pub fn position_score(position: usize, set_size: usize) -> f64 {
    if set_size == 0 {
        return 1.0;
    }
    1.0 - (position as f64 / set_size as f64) * POSITION_WEIGHT
}

/// Merge result sets into one ranked, id-unique list with scores
pub fn aggregate_scored(results: &[SearchResult]) -> Vec<ScoredAlbum> {
    let mut ranked: Vec<ScoredAlbum> = Vec::new();
    let mut index_by_id: HashMap<&str, usize> = HashMap::new();

    for result in results {
        let set_size = result.candidates.len();

        for (position, album) in result.candidates.iter().enumerate() {
            let score = result.confidence * position_score(position, set_size);

            match index_by_id.get(album.id.as_str()) {
                Some(&index) => {
                    // Strictly greater only: on ties the earlier album data stays
                    if score > ranked[index].score {
                        ranked[index] = ScoredAlbum {
                            album: album.clone(),
                            score,
                        };
                    }
                }
                None => {
                    index_by_id.insert(album.id.as_str(), ranked.len());
                    ranked.push(ScoredAlbum {
                        album: album.clone(),
                        score,
                    });
                }
            }
        }
    }

    // Vec::sort_by is stable, so equal scores keep first-discovery order
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Merge result sets into one ranked, id-unique album list
pub fn aggregate(results: &[SearchResult]) -> Vec<Album> {
    aggregate_scored(results)
        .into_iter()
        .map(|scored| scored.album)
        .collect()
}
