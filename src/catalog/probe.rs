//! Startup probing of the music directory.
//!
//! The catalog is embedded, but the audio files are not; these helpers
//! refresh declared durations from the files that exist and report
//! catalog/disk mismatches before the terminal is taken over.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::CatalogSettings;

use super::model::{Release, resolve_media_path};

/// Catalog/disk mismatches found by [`audit`].
#[derive(Debug, Default)]
pub struct AuditReport {
    /// Locators whose resolved file does not exist.
    pub missing: Vec<String>,
    /// Audio files under the root that no catalog entry references.
    pub unindexed: Vec<PathBuf>,
}

/// Refresh declared track durations from the real files, where present.
///
/// Files that are absent or unreadable keep their declared duration.
pub fn refresh_durations(releases: &mut [Release], root: &Path) {
    for release in releases.iter_mut() {
        for track in release.tracks.iter_mut() {
            let path = resolve_media_path(root, &track.file);
            if !path.is_file() {
                continue;
            }
            if let Ok(tagged) = lofty::read_from_path(&path) {
                track.duration = Some(tagged.properties().duration());
            }
        }
    }
}

fn is_audio_file(path: &Path, settings: &CatalogSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Walk the music root and compare it against the catalog.
pub fn audit(releases: &[Release], root: &Path, settings: &CatalogSettings) -> AuditReport {
    let mut report = AuditReport::default();

    let mut referenced: HashSet<PathBuf> = HashSet::new();
    for release in releases {
        for track in &release.tracks {
            let path = resolve_media_path(root, &track.file);
            if !path.is_file() {
                report.missing.push(track.file.clone());
            }
            referenced.insert(path);
        }
    }

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) && !referenced.contains(path) {
            report.unindexed.push(path.to_path_buf());
        }
    }
    report.unindexed.sort();

    report
}
