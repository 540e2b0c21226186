//! Metadata backend seam
//!
//! The strategy executor only ever talks to the backend through this trait,
//! so tests can substitute an in-memory fake for the MusicBrainz client.

use crate::musicbrainz::{MBError, MBRecording, MBRelease};
use async_trait::async_trait;

/// Keyword and field-qualified search over releases and recordings
///
/// `query` is either free text or a boolean expression over the `release`,
/// `recording` and `artist` fields, e.g. `release:"thriller" AND artist:"michael jackson"`.
/// Implementations must be stateless with respect to callers: concurrent
/// searches share one instance.
#[async_trait]
pub trait MetadataBackend: Send + Sync {
    async fn search_releases(&self, query: &str, limit: usize) -> Result<Vec<MBRelease>, MBError>;

    async fn search_recordings(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<MBRecording>, MBError>;
}
