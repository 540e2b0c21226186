//! Shared test fixtures: a scripted in-memory metadata backend

#![allow(dead_code)]

use albumeo_search::backend::MetadataBackend;
use albumeo_search::musicbrainz::{
    MBArtist, MBArtistCredit, MBError, MBRecording, MBRelease, MBReleaseRef,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Releases,
    Recordings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub kind: CallKind,
    pub query: String,
    pub limit: usize,
}

/// Answers exact query strings with canned results and records every call
///
/// Unscripted queries return an empty list. With `failing()` every call
/// returns a network error instead; `failing_on(query)` fails just that query.
#[derive(Default)]
pub struct FakeBackend {
    releases: HashMap<String, Vec<MBRelease>>,
    recordings: HashMap<String, Vec<MBRecording>>,
    fail: bool,
    failing_queries: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Fail every call (release or recording search) made with exactly `query`
    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    pub fn with_releases(mut self, query: &str, releases: Vec<MBRelease>) -> Self {
        self.releases.insert(query.to_string(), releases);
        self
    }

    pub fn with_recordings(mut self, query: &str, recordings: Vec<MBRecording>) -> Self {
        self.recordings.insert(query.to_string(), recordings);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn should_fail(&self, query: &str) -> bool {
        self.fail || self.failing_queries.contains(query)
    }

    fn record(&self, kind: CallKind, query: &str, limit: usize) {
        self.calls.lock().unwrap().push(Call {
            kind,
            query: query.to_string(),
            limit,
        });
    }
}

#[async_trait]
impl MetadataBackend for FakeBackend {
    async fn search_releases(&self, query: &str, limit: usize) -> Result<Vec<MBRelease>, MBError> {
        self.record(CallKind::Releases, query, limit);
        if self.should_fail(query) {
            return Err(MBError::NetworkError("connection refused".to_string()));
        }
        let mut releases = self.releases.get(query).cloned().unwrap_or_default();
        releases.truncate(limit);
        Ok(releases)
    }

    async fn search_recordings(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<MBRecording>, MBError> {
        self.record(CallKind::Recordings, query, limit);
        if self.should_fail(query) {
            return Err(MBError::NetworkError("connection refused".to_string()));
        }
        let mut recordings = self.recordings.get(query).cloned().unwrap_or_default();
        recordings.truncate(limit);
        Ok(recordings)
    }
}

pub fn credit(artist_id: &str, name: &str) -> MBArtistCredit {
    MBArtistCredit {
        name: name.to_string(),
        artist: MBArtist {
            id: artist_id.to_string(),
            name: name.to_string(),
            sort_name: None,
            disambiguation: None,
        },
    }
}

pub fn release(id: &str, title: &str, artist: &str) -> MBRelease {
    MBRelease {
        id: id.to_string(),
        title: title.to_string(),
        artist_credit: vec![credit(&format!("artist-{}", artist), artist)],
        date: Some("1975-10-31".to_string()),
    }
}

/// `count` distinct releases with ids `{prefix}-0 .. {prefix}-{count-1}`
pub fn releases(prefix: &str, count: usize) -> Vec<MBRelease> {
    (0..count)
        .map(|i| release(&format!("{}-{}", prefix, i), &format!("Album {}", i), "Queen"))
        .collect()
}

/// Recording that appears on the given release
pub fn recording(id: &str, title: &str, artist: &str, release_id: &str, album: &str) -> MBRecording {
    MBRecording {
        id: id.to_string(),
        title: title.to_string(),
        length: Some(354_000),
        artist_credit: vec![credit(&format!("artist-{}", artist), artist)],
        releases: vec![MBReleaseRef {
            id: release_id.to_string(),
            title: album.to_string(),
            date: Some("1975-10-31".to_string()),
        }],
    }
}
