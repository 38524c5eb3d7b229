use super::*;
use crate::catalog::{ARTIST_NAME, DEFAULT_COVER, Track};
use std::sync::mpsc;
use std::time::Duration;

fn t(id: &str) -> Track {
    Track {
        id: id.into(),
        title: id.into(),
        file: format!("music/{id}.mp3"),
        cover: None,
        artist: None,
        album: None,
        duration: Some(Duration::from_secs(100)),
        display: id.into(),
    }
}

fn t_with_cover(id: &str, cover: &str) -> Track {
    Track {
        cover: Some(cover.into()),
        ..t(id)
    }
}

fn queue_ids(player: &Player) -> Vec<&str> {
    player.queue().iter().map(|t| t.id.as_str()).collect()
}

fn history_ids(player: &Player) -> Vec<&str> {
    player.history().iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn select_new_track_sets_current_and_playing() {
    let mut player = Player::new();
    player.select_track(&t("a"), None);

    assert_eq!(player.current().unwrap().id, "a");
    assert!(player.is_playing());
    assert_eq!(player.position(), Duration::ZERO);
}

#[test]
fn select_current_track_toggles_instead_of_reloading() {
    let mut player = Player::new();
    let tracks = [t("a"), t("b")];
    player.select_track(&tracks[0], Some(&tracks));
    assert!(player.is_playing());

    player.select_track(&tracks[0], Some(&tracks));
    assert_eq!(player.current().unwrap().id, "a");
    assert!(!player.is_playing());
    // Queue and history are untouched by the toggle path.
    assert_eq!(queue_ids(&player), vec!["b"]);
    assert!(player.history().is_empty());

    player.select_track(&tracks[0], None);
    assert!(player.is_playing());
}

#[test]
fn select_track_increments_count_even_when_toggling() {
    // The count is bumped before the same-track check, so repeated taps on
    // the now-playing track keep inflating it. Intentional per the source.
    let mut player = Player::new();
    let track = t("a");

    player.select_track(&track, None);
    player.select_track(&track, None);
    player.select_track(&track, None);

    assert_eq!(player.play_count("a"), 3);
}

#[test]
fn select_track_fills_cover_and_artist_defaults() {
    let mut player = Player::new();

    player.select_track(&t("a"), None);
    let current = player.current().unwrap();
    assert_eq!(current.cover.as_deref(), Some(DEFAULT_COVER));
    assert_eq!(current.artist.as_deref(), Some(ARTIST_NAME));

    // A coverless track inherits the cover already on screen.
    player.select_track(&t_with_cover("b", "images/b.jpg"), None);
    player.select_track(&t("c"), None);
    assert_eq!(
        player.current().unwrap().cover.as_deref(),
        Some("images/b.jpg")
    );
}

#[test]
fn select_with_context_wraps_queue_around_selection() {
    let mut player = Player::new();
    let album = [t("t1"), t("t2"), t("t3")];

    player.select_track(&album[1], Some(&album));

    assert_eq!(player.current().unwrap().id, "t2");
    assert_eq!(queue_ids(&player), vec!["t3", "t1"]);
}

#[test]
fn select_without_context_clears_queue() {
    let mut player = Player::new();
    let album = [t("t1"), t("t2"), t("t3")];
    player.play_all(&album);
    assert_eq!(player.queue().len(), 2);

    player.select_track(&t("x"), None);
    assert!(player.queue().is_empty());
    assert_eq!(history_ids(&player), vec!["t1"]);
}

#[test]
fn select_with_context_missing_track_queues_context_as_given() {
    let mut player = Player::new();
    let album = [t("t1"), t("t2")];

    player.select_track(&t("x"), Some(&album));

    assert_eq!(player.current().unwrap().id, "x");
    assert_eq!(queue_ids(&player), vec!["t1", "t2"]);
}

#[test]
fn play_all_sets_head_and_queue_without_counting() {
    let mut player = Player::new();
    let album = [t("t1"), t("t2"), t("t3")];

    player.play_all(&album);

    assert_eq!(player.current().unwrap().id, "t1");
    assert_eq!(queue_ids(&player), vec!["t2", "t3"]);
    assert!(player.is_playing());
    assert_eq!(player.play_count("t1"), 0);

    // Empty sequence is a no-op.
    let mut idle = Player::new();
    idle.play_all(&[]);
    assert!(idle.current().is_none());
    assert!(!idle.is_playing());
}

#[test]
fn toggle_play_without_track_is_noop() {
    let mut player = Player::new();
    player.toggle_play();
    assert!(!player.is_playing());
    assert!(player.current().is_none());
}

#[test]
fn play_next_advances_and_records_history() {
    let mut player = Player::new();
    player.play_all(&[t("t1"), t("t2"), t("t3")]);

    player.play_next();

    assert_eq!(player.current().unwrap().id, "t2");
    assert_eq!(queue_ids(&player), vec!["t3"]);
    assert_eq!(history_ids(&player), vec!["t1"]);
    assert!(player.is_playing());
}

#[test]
fn play_next_with_empty_queue_stops_but_keeps_track() {
    let mut player = Player::new();
    player.select_track(&t("a"), None);
    assert!(player.queue().is_empty());

    player.play_next();

    assert_eq!(player.current().unwrap().id, "a");
    assert!(!player.is_playing());
    assert!(player.history().is_empty());
}

#[test]
fn play_previous_then_next_round_trips() {
    let mut player = Player::new();
    player.play_all(&[t("t1"), t("t2"), t("t3")]);
    player.play_next(); // current t2, queue [t3], history [t1]

    player.play_previous();
    assert_eq!(player.current().unwrap().id, "t1");
    assert_eq!(queue_ids(&player), vec!["t2", "t3"]);
    assert!(player.history().is_empty());

    player.play_next();
    assert_eq!(player.current().unwrap().id, "t2");
    assert_eq!(queue_ids(&player), vec!["t3"]);
    assert_eq!(history_ids(&player), vec!["t1"]);
}

#[test]
fn play_previous_with_empty_history_is_noop() {
    let mut player = Player::new();
    player.select_track(&t("a"), None);

    player.play_previous();

    assert_eq!(player.current().unwrap().id, "a");
    assert!(player.is_playing());
}

#[test]
fn jump_discards_entries_before_the_match() {
    let mut player = Player::new();
    player.play_all(&[t("t1"), t("t2"), t("t3")]);
    player.play_next(); // current t2, queue [t3]

    player.jump_to_track("t3");

    assert_eq!(player.current().unwrap().id, "t3");
    assert!(player.queue().is_empty());
    assert_eq!(history_ids(&player), vec!["t1", "t2"]);
}

#[test]
fn jump_to_unknown_id_leaves_state_untouched() {
    let mut player = Player::new();
    player.play_all(&[t("t1"), t("t2"), t("t3")]);

    let current_before = player.current().cloned();
    let queue_before: Vec<Track> = player.queue().to_vec();
    let history_before: Vec<Track> = player.history().to_vec();

    player.jump_to_track("nope");

    assert_eq!(player.current().cloned(), current_before);
    assert_eq!(player.queue().to_vec(), queue_before);
    assert_eq!(player.history().to_vec(), history_before);
    assert!(player.is_playing());
}

#[test]
fn popular_tracks_is_stable_under_ties_and_truncates() {
    let mut player = Player::new();
    let (a, b, c, d) = (t("a"), t("b"), t("c"), t("d"));

    // Counts: a=0, b=2, c=2, d=1. Repeat selections toggle, but still count.
    player.select_track(&b, None);
    player.select_track(&b, None);
    player.select_track(&c, None);
    player.select_track(&c, None);
    player.select_track(&d, None);

    let all = [a, b, c, d];
    let top = player.popular_tracks(&all, 2);
    let top_ids: Vec<&str> = top.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(top_ids, vec!["b", "c"]);

    let everything = player.popular_tracks(&all, 10);
    assert_eq!(everything.len(), 4);
    assert_eq!(everything[0].id, "b");
    assert_eq!(everything[1].id, "c");
    assert_eq!(everything[2].id, "d");
    assert_eq!(everything[3].id, "a");
}

#[test]
fn position_and_duration_fold_in_from_the_engine() {
    let mut player = Player::new();
    player.select_track(&t("a"), None);
    assert_eq!(player.duration(), Some(Duration::from_secs(100)));

    player.set_duration(Duration::from_secs(208));
    player.set_position(Duration::from_secs(42));

    assert_eq!(player.duration(), Some(Duration::from_secs(208)));
    assert_eq!(player.position(), Duration::from_secs(42));
}

#[test]
fn events_follow_select_toggle_and_advance_paths() {
    let mut player = Player::new();
    let (tx, rx) = mpsc::channel::<PlayerEvent>();
    player.subscribe(Box::new(move |ev| {
        let _ = tx.send(ev.clone());
    }));

    let album = [t("t1"), t("t2")];
    player.select_track(&album[0], Some(&album));
    player.toggle_play();
    player.toggle_play();
    player.play_next();
    player.play_next(); // queue empty: stop

    let events: Vec<PlayerEvent> = rx.try_iter().collect();
    assert_eq!(events.len(), 5);
    assert!(matches!(&events[0], PlayerEvent::TrackChanged(t) if t.id == "t1"));
    assert_eq!(events[1], PlayerEvent::Paused);
    assert_eq!(events[2], PlayerEvent::Resumed);
    assert!(matches!(&events[3], PlayerEvent::TrackChanged(t) if t.id == "t2"));
    assert_eq!(events[4], PlayerEvent::Paused);
}

#[test]
fn playback_state_derives_from_current_and_flag() {
    let mut player = Player::new();
    assert_eq!(player.playback_state(), PlaybackState::Stopped);

    player.select_track(&t("a"), None);
    assert_eq!(player.playback_state(), PlaybackState::Playing);

    player.toggle_play();
    assert_eq!(player.playback_state(), PlaybackState::Paused);
}
