use std::path::{Path, PathBuf};
use std::time::Duration;

/// A single playable item in the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    /// Unique id within the catalog.
    pub id: String,
    pub title: String,
    /// Locator of the audio file, resolved against the music root.
    pub file: String,
    /// Cover art locator; a default is filled in when absent.
    pub cover: Option<String>,
    /// Track artist; the catalog artist is assumed when absent.
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Declared length; refreshed from the real file when it exists.
    pub duration: Option<Duration>,
    /// Precomposed list line, built from the configured display fields.
    pub display: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReleaseKind {
    Single,
    Album,
}

impl ReleaseKind {
    pub fn label(self) -> &'static str {
        match self {
            ReleaseKind::Single => "Single",
            ReleaseKind::Album => "Album",
        }
    }
}

/// A published collection of one or more tracks.
#[derive(Clone, Debug)]
pub struct Release {
    pub title: String,
    pub cover: String,
    pub year: u16,
    pub kind: ReleaseKind,
    /// Unique slug, the release's stable identifier.
    pub slug: String,
    pub tracks: Vec<Track>,
    /// Optional artist override for the whole release.
    pub artist: Option<String>,
}

/// Resolve a track locator against the music root.
///
/// Locators may be site-absolute (`/music/a.mp3`) or relative
/// (`music/a.mp3`); both resolve under the root.
pub fn resolve_media_path(root: &Path, locator: &str) -> PathBuf {
    root.join(locator.trim_start_matches('/'))
}
