//! The embedded discography.
//!
//! Release order is newest-first; `all_tracks` flattens it in that order
//! for "play everything" and popularity ranking.

use std::time::Duration;

use crate::config::CatalogSettings;

use super::display::display_from_fields;
use super::model::{Release, ReleaseKind, Track};

/// The catalog artist, assumed for any track without an explicit artist.
pub const ARTIST_NAME: &str = "David";

/// Cover used when neither a track nor the current track provides one.
pub const DEFAULT_COVER: &str = "images/default-cover.jpg";

fn track(
    id: &str,
    title: &str,
    file: &str,
    cover: &str,
    album: Option<&str>,
    secs: u64,
    settings: &CatalogSettings,
) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        file: file.to_string(),
        cover: Some(cover.to_string()),
        artist: None,
        album: album.map(str::to_string),
        duration: Some(Duration::from_secs(secs)),
        display: display_from_fields(
            file,
            title,
            None,
            album,
            &settings.display_fields,
            &settings.display_separator,
        ),
    }
}

/// Build the full discography, newest release first.
pub fn discography(settings: &CatalogSettings) -> Vec<Release> {
    let musings_tracks = [
        ("1", "Musings", "music/01-musings.mp3", 209),
        ("2", "Love Comes, Love Goes", "music/02-love-comes-love-goes.mp3", 163),
        ("3", "Let You Go", "music/03-let-you-go.mp3", 144),
        ("4", "I Hope You Know Love", "music/04-i-hope-you-know-love.mp3", 225),
        ("5", "Drowning", "music/05-drowning.mp3", 219),
        ("6", "Get Over You", "music/06-get-over-you.mp3", 195),
        ("7", "Solo Tú", "music/07-solo-tu.mp3", 151),
        ("8", "One Request", "music/08-one-request.mp3", 141),
        ("9", "Musings (slowed + reverb)", "music/09-musings-slowed-reverb.mp3", 241),
        (
            "10",
            "Love Comes, Love Goes (stripped)",
            "music/10-love-comes-love-goes-stripped.mp3",
            154,
        ),
        (
            "11",
            "Love Comes, Love Goes (stripped + slowed + reverb)",
            "music/11-love-comes-love-goes-stripped-slowed-reverb.mp3",
            181,
        ),
    ];

    vec![
        Release {
            title: "Healing Hurts".to_string(),
            cover: "images/healing-hurts.jpg".to_string(),
            year: 2025,
            kind: ReleaseKind::Single,
            slug: "healing-hurts".to_string(),
            artist: None,
            tracks: vec![track(
                "healing-hurts",
                "Healing Hurts",
                "music/healing-hurts.mp3",
                "images/healing-hurts.jpg",
                None,
                208,
                settings,
            )],
        },
        Release {
            title: "R-U-D-1?".to_string(),
            cover: "images/rud1.jpg".to_string(),
            year: 2025,
            kind: ReleaseKind::Single,
            slug: "rud1".to_string(),
            artist: None,
            tracks: vec![track(
                "rud1",
                "R-U-D-1?",
                "music/rud1.mp3",
                "images/rud1.jpg",
                None,
                238,
                settings,
            )],
        },
        Release {
            title: "Did You?".to_string(),
            cover: "images/did-you.jpg".to_string(),
            year: 2025,
            kind: ReleaseKind::Single,
            slug: "did-you".to_string(),
            artist: None,
            tracks: vec![track(
                "did-you",
                "Did You?",
                "music/did-you.mp3",
                "images/did-you.jpg",
                None,
                165,
                settings,
            )],
        },
        Release {
            title: "Musings".to_string(),
            cover: "images/musings.jpg".to_string(),
            year: 2025,
            kind: ReleaseKind::Album,
            slug: "musings".to_string(),
            artist: None,
            tracks: musings_tracks
                .iter()
                .map(|&(id, title, file, secs)| {
                    track(
                        id,
                        title,
                        file,
                        "images/musings.jpg",
                        Some("Musings"),
                        secs,
                        settings,
                    )
                })
                .collect(),
        },
    ]
}

/// Flatten the discography into a single track sequence, release order.
pub fn all_tracks(releases: &[Release]) -> Vec<Track> {
    releases
        .iter()
        .flat_map(|r| r.tracks.iter().cloned())
        .collect()
}

/// The newest release, shown on the home page.
pub fn latest_release(releases: &[Release]) -> Option<&Release> {
    releases.first()
}
