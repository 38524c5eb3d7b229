use std::collections::HashMap;
use std::time::Duration;

use crate::catalog::{ARTIST_NAME, DEFAULT_COVER, Track};

use super::events::{Listener, PlayerEvent};

/// Coarse playback status derived from the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The playback store.
///
/// Owned by the runtime thread; all mutations are synchronous and complete
/// before the next event is processed. The current track is never also in
/// the queue: transition operations swap it through the history atomically.
pub struct Player {
    current: Option<Track>,
    is_playing: bool,
    queue: Vec<Track>,
    history: Vec<Track>,
    position: Duration,
    duration: Option<Duration>,
    play_counts: HashMap<String, u64>,
    listeners: Vec<Listener>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            current: None,
            is_playing: false,
            queue: Vec::new(),
            history: Vec::new(),
            position: Duration::ZERO,
            duration: None,
            play_counts: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Register a listener for store events.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    fn emit(&mut self, event: PlayerEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Begin playback of `track`, optionally within a context queue
    /// (an album or playlist the track was picked from).
    ///
    /// Selecting the already-current track toggles pause/resume instead of
    /// reloading it. The play count is bumped on every call, including that
    /// toggle path: the count tracks selections, not completed plays.
    pub fn select_track(&mut self, track: &Track, context: Option<&[Track]>) {
        *self.play_counts.entry(track.id.clone()).or_insert(0) += 1;

        if self.current.as_ref().is_some_and(|c| c.id == track.id) {
            self.toggle_play();
            return;
        }

        // Fill defaults before the old current track is displaced: a track
        // without a cover inherits the one already on screen.
        let filled = self.with_defaults(track);

        if let Some(prev) = self.current.take() {
            self.history.push(prev);
        }

        self.queue = match context {
            Some(ctx) if !ctx.is_empty() => reorder_context(ctx, &track.id),
            _ => Vec::new(),
        };

        self.duration = filled.duration;
        self.current = Some(filled.clone());
        self.start_playing();
        self.emit(PlayerEvent::TrackChanged(filled));
    }

    /// Play a sequence from its start: head becomes current, tail becomes
    /// the queue. No-op on an empty sequence; play counts are untouched.
    pub fn play_all(&mut self, tracks: &[Track]) {
        let Some((first, rest)) = tracks.split_first() else {
            return;
        };

        if let Some(prev) = self.current.take() {
            self.history.push(prev);
        }

        self.queue = rest.to_vec();
        self.duration = first.duration;
        self.current = Some(first.clone());
        self.start_playing();
        self.emit(PlayerEvent::TrackChanged(first.clone()));
    }

    /// Flip pause/resume. Silent no-op when nothing is loaded.
    pub fn toggle_play(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.is_playing = !self.is_playing;
        let event = if self.is_playing {
            PlayerEvent::Resumed
        } else {
            PlayerEvent::Paused
        };
        self.emit(event);
    }

    /// Advance to the head of the queue. With no current track or an empty
    /// queue this stops playback and changes nothing else.
    pub fn play_next(&mut self) {
        if self.current.is_none() || self.queue.is_empty() {
            if self.is_playing {
                self.is_playing = false;
                self.emit(PlayerEvent::Paused);
            }
            return;
        }

        let next = self.queue.remove(0);
        if let Some(prev) = self.current.take() {
            self.history.push(prev);
        }

        self.duration = next.duration;
        self.current = Some(next.clone());
        self.start_playing();
        self.emit(PlayerEvent::TrackChanged(next));
    }

    /// Step back to the most recently played track; the displaced current
    /// track goes to the front of the queue. No-op on empty history.
    pub fn play_previous(&mut self) {
        let Some(prev) = self.history.pop() else {
            return;
        };

        if let Some(cur) = self.current.take() {
            self.queue.insert(0, cur);
        }

        self.duration = prev.duration;
        self.current = Some(prev.clone());
        self.start_playing();
        self.emit(PlayerEvent::TrackChanged(prev));
    }

    /// Jump forward to a queued track by id. Everything before the first
    /// match is skipped over, not preserved. Silent no-op when absent.
    pub fn jump_to_track(&mut self, track_id: &str) {
        let Some(idx) = self.queue.iter().position(|t| t.id == track_id) else {
            return;
        };

        let mut rest = self.queue.split_off(idx);
        let selected = rest.remove(0);
        self.queue = rest;

        if let Some(cur) = self.current.take() {
            self.history.push(cur);
        }

        self.duration = selected.duration;
        self.current = Some(selected.clone());
        self.start_playing();
        self.emit(PlayerEvent::TrackChanged(selected));
    }

    /// Rank `all` by play count, descending, truncated to `top_n`.
    pub fn popular_tracks(&self, all: &[Track], top_n: usize) -> Vec<Track> {
        let mut ranked = all.to_vec();
        // sort_by_key is stable, so equal counts keep their input order.
        ranked.sort_by_key(|t| std::cmp::Reverse(self.play_count(&t.id)));
        ranked.truncate(top_n);
        ranked
    }

    /// Times this track has been selected for playback.
    pub fn play_count(&self, track_id: &str) -> u64 {
        self.play_counts.get(track_id).copied().unwrap_or(0)
    }

    /// Fold the engine-reported elapsed time into the session state.
    pub fn set_position(&mut self, position: Duration) {
        self.position = position;
    }

    /// Fold the engine-reported total length of the loaded track.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = Some(duration);
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn history(&self) -> &[Track] {
        &self.history
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn playback_state(&self) -> PlaybackState {
        match (&self.current, self.is_playing) {
            (None, _) => PlaybackState::Stopped,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    fn start_playing(&mut self) {
        self.position = Duration::ZERO;
        self.is_playing = true;
    }

    fn with_defaults(&self, track: &Track) -> Track {
        let mut filled = track.clone();
        if filled.cover.is_none() {
            filled.cover = self
                .current
                .as_ref()
                .and_then(|c| c.cover.clone())
                .or_else(|| Some(DEFAULT_COVER.to_string()));
        }
        if filled.artist.is_none() {
            filled.artist = Some(ARTIST_NAME.to_string());
        }
        filled
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild a queue from a context so the selected track comes first with
/// the remaining tracks wrapped around it in their original relative order,
/// then drop the selected head.
fn reorder_context(context: &[Track], selected_id: &str) -> Vec<Track> {
    match context.iter().position(|t| t.id == selected_id) {
        Some(idx) => {
            let mut wrapped = Vec::with_capacity(context.len().saturating_sub(1));
            wrapped.extend_from_slice(&context[idx + 1..]);
            wrapped.extend_from_slice(&context[..idx]);
            wrapped
        }
        // Selected track not in the context: queue the context as given.
        None => context.to_vec(),
    }
}
