use super::*;
use crate::config::{CatalogSettings, TrackDisplayField};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn discography_ids_and_slugs_are_unique() {
    let releases = discography(&CatalogSettings::default());

    let mut slugs = HashSet::new();
    for r in &releases {
        assert!(slugs.insert(r.slug.clone()), "duplicate slug: {}", r.slug);
    }

    let mut ids = HashSet::new();
    for t in all_tracks(&releases) {
        assert!(ids.insert(t.id.clone()), "duplicate track id: {}", t.id);
    }
}

#[test]
fn all_tracks_flattens_in_release_order() {
    let releases = discography(&CatalogSettings::default());
    let tracks = all_tracks(&releases);

    let expected: usize = releases.iter().map(|r| r.tracks.len()).sum();
    assert_eq!(tracks.len(), expected);
    assert_eq!(tracks[0].id, releases[0].tracks[0].id);
}

#[test]
fn latest_release_is_first_entry() {
    let releases = discography(&CatalogSettings::default());
    assert_eq!(latest_release(&releases).unwrap().slug, releases[0].slug);
}

#[test]
fn resolve_media_path_handles_site_absolute_locators() {
    let root = Path::new("/tmp/music-root");
    assert_eq!(
        resolve_media_path(root, "/music/a.mp3"),
        root.join("music/a.mp3")
    );
    assert_eq!(
        resolve_media_path(root, "music/a.mp3"),
        root.join("music/a.mp3")
    );
}

#[test]
fn display_from_fields_composes_and_falls_back_to_title() {
    let fields = [TrackDisplayField::Artist, TrackDisplayField::Title];
    assert_eq!(
        display_from_fields("music/a.mp3", "Song", Some("Artist"), None, &fields, " - "),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields("music/a.mp3", "Song", None, None, &fields, " - "),
        "Song"
    );

    let fields = [TrackDisplayField::Filename];
    assert_eq!(
        display_from_fields("music/05-drowning.mp3", "Drowning", None, None, &fields, " - "),
        "05-drowning"
    );

    // No parts produced at all -> plain title.
    let fields = [TrackDisplayField::Album];
    assert_eq!(
        display_from_fields("music/a.mp3", "Song", None, None, &fields, " - "),
        "Song"
    );
}

#[test]
fn audit_reports_missing_and_unindexed_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("music")).unwrap();

    let settings = CatalogSettings::default();
    let releases = discography(&settings);

    // One referenced file present, one stray file nobody references.
    fs::write(root.join("music/healing-hurts.mp3"), b"not a real mp3").unwrap();
    fs::write(root.join("music/stray.mp3"), b"not a real mp3").unwrap();
    fs::write(root.join("music/notes.txt"), b"ignore me").unwrap();

    let report = audit(&releases, root, &settings);

    assert!(!report.missing.contains(&"music/healing-hurts.mp3".to_string()));
    assert!(report.missing.contains(&"music/rud1.mp3".to_string()));
    assert_eq!(report.unindexed, vec![root.join("music/stray.mp3")]);
}

#[test]
fn refresh_durations_keeps_declared_value_for_unreadable_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("music")).unwrap();
    // Present but not decodable; the declared duration must survive.
    fs::write(root.join("music/healing-hurts.mp3"), b"not a real mp3").unwrap();

    let settings = CatalogSettings::default();
    let mut releases = discography(&settings);
    let declared = releases[0].tracks[0].duration;

    refresh_durations(&mut releases, root);
    assert_eq!(releases[0].tracks[0].duration, declared);
}
