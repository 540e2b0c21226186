//! Heuristic query decomposition
//!
//! Turns free text such as `"thriller michael jackson"` or
//! `"bohemian rhapsody by queen"` into candidate title/artist fields plus the
//! ordered list of strategies worth trying. The heuristics are purely
//! syntactic: the parser never looks anything up.

use crate::strategy::SearchStrategy;
use serde::Serialize;

/// Separator phrases in priority order; only the first one present is used
pub const DEFAULT_SEPARATORS: [&str; 6] = [" - ", " by ", " from ", " feat ", " ft ", " featuring "];

/// Longest whitespace tail that still looks like an artist name
const MAX_ARTIST_WORDS: usize = 3;
/// Shortest artist tail, in characters
const MIN_ARTIST_CHARS: usize = 3;

/// Structured interpretation of one raw query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    /// Query exactly as the caller gave it
    pub original: String,
    /// Normalized pieces, in order
    pub terms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_title: Option<String>,
    /// Always starts with [`SearchStrategy::Exact`] and ends with [`SearchStrategy::Fuzzy`]
    pub search_strategies: Vec<SearchStrategy>,
}

impl ParsedQuery {
    /// Same query with title and artist guesses exchanged
    pub fn swapped(&self) -> ParsedQuery {
        ParsedQuery {
            possible_artist: self.possible_title.clone(),
            possible_title: self.possible_artist.clone(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryParser {
    separators: Vec<String>,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryParser {
    pub fn new() -> Self {
        Self::with_separators(DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect())
    }

    /// Parser using a custom separator list (priority order)
    pub fn with_separators(separators: Vec<String>) -> Self {
        Self { separators }
    }

    /// Parse raw query text; never fails
    pub fn parse(&self, raw_query: &str) -> ParsedQuery {
        let clean_query = raw_query.trim().to_lowercase();
        let terms = self.split_query(&clean_query);

        let mut parsed = ParsedQuery {
            original: raw_query.to_string(),
            terms,
            possible_artist: None,
            possible_title: None,
            search_strategies: vec![SearchStrategy::Exact],
        };

        if parsed.terms.len() >= 2 {
            let (title, artist) = identify_title_and_artist(&parsed.terms);

            if title.is_some() && artist.is_some() {
                parsed
                    .search_strategies
                    .extend([SearchStrategy::TitleArtist, SearchStrategy::ArtistTitle]);
            }
            parsed.possible_title = title;
            parsed.possible_artist = artist;

            // Single-field strategies decide applicability themselves
            parsed
                .search_strategies
                .extend([SearchStrategy::ArtistOnly, SearchStrategy::TitleOnly]);
        }

        parsed.search_strategies.push(SearchStrategy::Fuzzy);
        parsed
    }

    fn split_query(&self, query: &str) -> Vec<String> {
        if let Some(separator) = self.separators.iter().find(|sep| query.contains(sep.as_str())) {
            return query
                .split(separator.as_str())
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
                .collect();
        }

        let words: Vec<&str> = query.split_whitespace().collect();
        if words.len() <= 2 {
            return words.into_iter().map(str::to_string).collect();
        }

        // Longer first part (title) followed by a short trailing artist name
        for split in 1..words.len() {
            let tail = &words[split..];
            let tail_text = tail.join(" ");
            if tail.len() <= MAX_ARTIST_WORDS && tail_text.chars().count() >= MIN_ARTIST_CHARS {
                return vec![words[..split].join(" "), tail_text];
            }
        }

        words.into_iter().map(str::to_string).collect()
    }
}

/// Positional guess: `(title, artist)`
fn identify_title_and_artist(terms: &[String]) -> (Option<String>, Option<String>) {
    if terms.len() == 2 {
        return (Some(terms[0].clone()), Some(terms[1].clone()));
    }

    let joined = terms.join(" ");
    let words: Vec<&str> = joined.split_whitespace().collect();
    if words.len() >= 3 {
        let split = words.len() - 2;
        return (Some(words[..split].join(" ")), Some(words[split..].join(" ")));
    }

    (None, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use SearchStrategy::*;

    fn parse(query: &str) -> ParsedQuery {
        QueryParser::new().parse(query)
    }

    #[test]
    fn test_separator_by() {
        let parsed = parse("Bohemian Rhapsody by Queen");
        assert_eq!(parsed.original, "Bohemian Rhapsody by Queen");
        assert_eq!(parsed.terms, vec!["bohemian rhapsody", "queen"]);
        assert_eq!(parsed.possible_title.as_deref(), Some("bohemian rhapsody"));
        assert_eq!(parsed.possible_artist.as_deref(), Some("queen"));
        assert_eq!(
            parsed.search_strategies,
            vec![Exact, TitleArtist, ArtistTitle, ArtistOnly, TitleOnly, Fuzzy]
        );
    }

    #[test]
    fn test_whitespace_split_point() {
        let parsed = parse("thriller michael jackson");
        assert_eq!(parsed.terms, vec!["thriller", "michael jackson"]);
        assert_eq!(parsed.possible_title.as_deref(), Some("thriller"));
        assert_eq!(parsed.possible_artist.as_deref(), Some("michael jackson"));
    }

    #[test]
    fn test_empty_query() {
        let parsed = parse("");
        assert!(parsed.terms.is_empty());
        assert_eq!(parsed.possible_title, None);
        assert_eq!(parsed.possible_artist, None);
        assert_eq!(parsed.search_strategies, vec![Exact, Fuzzy]);
    }

    #[test]
    fn test_whitespace_only_query() {
        let parsed = parse("   \t ");
        assert!(parsed.terms.is_empty());
        assert_eq!(parsed.search_strategies, vec![Exact, Fuzzy]);
    }

    #[test]
    fn test_single_word() {
        let parsed = parse("Adele");
        assert_eq!(parsed.terms, vec!["adele"]);
        assert_eq!(parsed.possible_title, None);
        assert_eq!(parsed.search_strategies, vec![Exact, Fuzzy]);
    }

    #[test]
    fn test_two_words_positional() {
        let parsed = parse("abbey road");
        assert_eq!(parsed.terms, vec!["abbey", "road"]);
        assert_eq!(parsed.possible_title.as_deref(), Some("abbey"));
        assert_eq!(parsed.possible_artist.as_deref(), Some("road"));
    }

    #[test]
    fn test_separator_splits_on_all_occurrences() {
        let parsed = parse("a - b -  - c");
        assert_eq!(parsed.terms, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_three_terms_use_last_two_words_as_artist() {
        let parsed = parse("dark side - of the - pink floyd");
        assert_eq!(parsed.terms, vec!["dark side", "of the", "pink floyd"]);
        assert_eq!(parsed.possible_title.as_deref(), Some("dark side of the"));
        assert_eq!(parsed.possible_artist.as_deref(), Some("pink floyd"));
        assert!(parsed.search_strategies.contains(&TitleArtist));
    }

    #[test]
    fn test_separator_priority() {
        // " - " outranks " by " even when " by " appears first
        let parsed = parse("stand by me - ben e king");
        assert_eq!(parsed.terms, vec!["stand by me", "ben e king"]);
    }

    #[test]
    fn test_featuring_separator() {
        let parsed = parse("Empire State of Mind feat Alicia Keys");
        assert_eq!(parsed.terms, vec!["empire state of mind", "alicia keys"]);
    }

    #[test]
    fn test_long_query_takes_three_word_tail() {
        let parsed = parse("the dark side of the moon");
        assert_eq!(parsed.terms, vec!["the dark side", "of the moon"]);
        assert_eq!(parsed.possible_artist.as_deref(), Some("of the moon"));
    }

    #[test]
    fn test_separator_yielding_one_term() {
        let parsed = parse("queen - ");
        // Trimmed to "queen -", which no longer contains " - "
        assert_eq!(parsed.terms, vec!["queen", "-"]);

        let parsed = parse("x by ");
        assert_eq!(parsed.terms, vec!["x", "by"]);
    }

    #[test]
    fn test_strategy_order_invariants() {
        for query in ["", "a", "a b", "a b c d e f", "x by y", "p - q - r"] {
            let parsed = parse(query);
            let strategies = &parsed.search_strategies;
            assert_eq!(strategies.first(), Some(&Exact), "{query:?}");
            assert_eq!(strategies.last(), Some(&Fuzzy), "{query:?}");

            let mut unique = strategies.clone();
            unique.dedup();
            assert_eq!(&unique, strategies, "duplicate strategy for {query:?}");
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(parse("Hotel California Eagles"), parse("Hotel California Eagles"));
    }

    #[test]
    fn test_swapped() {
        let swapped = parse("thriller michael jackson").swapped();
        assert_eq!(swapped.possible_title.as_deref(), Some("michael jackson"));
        assert_eq!(swapped.possible_artist.as_deref(), Some("thriller"));
    }

    #[test]
    fn test_custom_separators() {
        let parser = QueryParser::with_separators(vec![" / ".to_string()]);
        let parsed = parser.parse("Blue / Joni Mitchell");
        assert_eq!(parsed.terms, vec!["blue", "joni mitchell"]);
    }
}
