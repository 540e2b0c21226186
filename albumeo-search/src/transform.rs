//! Backend response → album/track conversion

use crate::models::{Album, Track, TrackAlbum, TrackArtist};
use crate::musicbrainz::{MBArtistCredit, MBRecording, MBRelease};
use std::collections::HashSet;

const MUSICBRAINZ_WEB_URL: &str = "https://musicbrainz.org";
const UNKNOWN_ARTIST: &str = "Unknown Artist";

pub fn release_url(release_id: &str) -> String {
    format!("{}/release/{}", MUSICBRAINZ_WEB_URL, release_id)
}

pub fn recording_url(recording_id: &str) -> String {
    format!("{}/recording/{}", MUSICBRAINZ_WEB_URL, recording_id)
}

fn primary_artist(credits: &[MBArtistCredit]) -> TrackArtist {
    match credits.first() {
        Some(credit) => TrackArtist {
            id: credit.artist.id.clone(),
            name: credit.name.clone(),
        },
        None => TrackArtist {
            id: String::new(),
            name: UNKNOWN_ARTIST.to_string(),
        },
    }
}

pub fn release_to_album(release: &MBRelease) -> Album {
    let artist = primary_artist(&release.artist_credit);

    Album {
        id: release.id.clone(),
        name: release.title.clone(),
        artist_name: artist.name,
        artist_id: artist.id,
        source_url: release_url(&release.id),
        image_refs: vec![release.id.clone()],
        release_date: release.date.clone(),
    }
}

pub fn releases_to_albums(releases: &[MBRelease]) -> Vec<Album> {
    releases.iter().map(release_to_album).collect()
}

pub fn recording_to_track(recording: &MBRecording) -> Track {
    // Only the first referenced release counts as the track's album
    let album = recording.releases.first().map(|release| TrackAlbum {
        id: release.id.clone(),
        title: release.title.clone(),
        release_date: release.date.clone(),
    });

    Track {
        id: recording.id.clone(),
        name: recording.title.clone(),
        artist: primary_artist(&recording.artist_credit),
        image_refs: album.iter().map(|a| a.id.clone()).collect(),
        album,
        source_url: recording_url(&recording.id),
        duration_ms: recording.length,
    }
}

pub fn recordings_to_tracks(recordings: &[MBRecording]) -> Vec<Track> {
    recordings.iter().map(recording_to_track).collect()
}

/// Album a track belongs to, attributed to the track's artist
pub fn track_to_album(track: &Track) -> Option<Album> {
    let album = track.album.as_ref()?;

    Some(Album {
        id: album.id.clone(),
        name: album.title.clone(),
        artist_name: track.artist.name.clone(),
        artist_id: track.artist.id.clone(),
        source_url: release_url(&album.id),
        image_refs: vec![album.id.clone()],
        release_date: album.release_date.clone(),
    })
}

/// Albums referenced by recordings, in recording order
pub fn recordings_to_albums(recordings: &[MBRecording]) -> Vec<Album> {
    recordings_to_tracks(recordings)
        .iter()
        .filter_map(track_to_album)
        .collect()
}

/// Drop later albums whose id was already seen; first occurrence wins
pub fn dedup_by_id(albums: Vec<Album>) -> Vec<Album> {
    let mut seen = HashSet::new();
    albums
        .into_iter()
        .filter(|album| seen.insert(album.id.clone()))
        .collect()
}

/// Escape a value for use inside a quoted Lucene field term
pub fn escape_query_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::musicbrainz::{MBArtist, MBReleaseRef};

    fn credit(id: &str, name: &str) -> MBArtistCredit {
        MBArtistCredit {
            name: name.to_string(),
            artist: MBArtist {
                id: id.to_string(),
                name: name.to_string(),
                sort_name: None,
                disambiguation: None,
            },
        }
    }

    fn recording(id: &str, releases: &[(&str, &str)]) -> MBRecording {
        MBRecording {
            id: id.to_string(),
            title: format!("Song {}", id),
            length: Some(294_000),
            artist_credit: vec![credit("a1", "Michael Jackson")],
            releases: releases
                .iter()
                .map(|(id, title)| MBReleaseRef {
                    id: id.to_string(),
                    title: title.to_string(),
                    date: Some("1982".to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn test_release_to_album_uses_primary_credit() {
        let release = MBRelease {
            id: "rel-1".to_string(),
            title: "Thriller".to_string(),
            artist_credit: vec![credit("a1", "Michael Jackson"), credit("a2", "Paul McCartney")],
            date: Some("1982-11-30".to_string()),
        };

        let album = release_to_album(&release);
        assert_eq!(album.artist_name, "Michael Jackson");
        assert_eq!(album.artist_id, "a1");
        assert_eq!(album.source_url, "https://musicbrainz.org/release/rel-1");
        assert_eq!(album.image_refs, vec!["rel-1".to_string()]);
        assert_eq!(album.release_date.as_deref(), Some("1982-11-30"));
    }

    #[test]
    fn test_release_without_credit_is_unknown_artist() {
        let release = MBRelease {
            id: "rel-2".to_string(),
            title: "Untitled".to_string(),
            artist_credit: vec![],
            date: None,
        };

        let album = release_to_album(&release);
        assert_eq!(album.artist_name, "Unknown Artist");
        assert_eq!(album.artist_id, "");
    }

    #[test]
    fn test_recording_uses_first_release_only() {
        let track = recording_to_track(&recording("r1", &[("rel-a", "Thriller"), ("rel-b", "Hits")]));
        assert_eq!(track.album.as_ref().unwrap().id, "rel-a");
        assert_eq!(track.image_refs, vec!["rel-a".to_string()]);
        assert_eq!(track.source_url, "https://musicbrainz.org/recording/r1");
        assert_eq!(track.duration_ms, Some(294_000));

        let album = track_to_album(&track).unwrap();
        assert_eq!(album.id, "rel-a");
        assert_eq!(album.name, "Thriller");
        assert_eq!(album.artist_name, "Michael Jackson");
        assert_eq!(album.release_date.as_deref(), Some("1982"));
    }

    #[test]
    fn test_recording_without_release_yields_no_album() {
        let recordings = vec![recording("r1", &[]), recording("r2", &[("rel-a", "Thriller")])];
        let albums = recordings_to_albums(&recordings);
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].id, "rel-a");
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let recordings = vec![
            recording("r1", &[("rel-a", "First Title")]),
            recording("r2", &[("rel-b", "Other")]),
            recording("r3", &[("rel-a", "Second Title")]),
        ];
        let albums = dedup_by_id(recordings_to_albums(&recordings));

        let ids: Vec<_> = albums.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["rel-a", "rel-b"]);
        assert_eq!(albums[0].name, "First Title");
    }

    #[test]
    fn test_escape_query_value() {
        assert_eq!(escape_query_value("thriller"), "thriller");
        assert_eq!(escape_query_value(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_query_value(r"a\b"), r"a\\b");
    }
}
