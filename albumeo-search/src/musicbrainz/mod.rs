//! MusicBrainz web service integration

pub mod client;
pub mod types;

pub use client::{MBError, MusicBrainzClient};
pub use types::{MBArtist, MBArtistCredit, MBRecording, MBRelease, MBReleaseRef};
