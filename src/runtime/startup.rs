use std::path::PathBuf;

use crate::app::App;
use crate::catalog;
use crate::config::Settings;

/// Build the catalog, probe the music directory and assemble the
/// navigation model. Mismatch reports go to stderr before the terminal is
/// taken over.
pub fn build_app(settings: &Settings) -> (App, PathBuf) {
    let music_root = PathBuf::from(&settings.catalog.music_dir);

    let mut releases = catalog::discography(&settings.catalog);
    catalog::refresh_durations(&mut releases, &music_root);

    if settings.catalog.audit {
        let report = catalog::audit(&releases, &music_root, &settings.catalog);
        for locator in &report.missing {
            eprintln!("encore: no audio file for catalog entry '{locator}'");
        }
        for path in &report.unindexed {
            eprintln!("encore: unindexed audio file {}", path.display());
        }
    }

    let all_tracks = catalog::all_tracks(&releases);
    let mut app = App::new(releases, all_tracks);
    app.set_music_dir(settings.catalog.music_dir.clone());

    (app, music_root)
}
