use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, HomePane, Screen};
use crate::audio::{AudioCmd, AudioEngine, AudioEvent, ProgressHandle};
use crate::catalog::resolve_media_path;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlaybackState, Player, PlayerEvent};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known current track id as emitted to MPRIS.
    pub last_mpris_track: Option<String>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `player`.
    pub fn new(player: &Player) -> Self {
        Self {
            pending_gg: false,
            last_mpris_track: None,
            last_mpris_playback: player.playback_state(),
        }
    }
}

/// Main terminal event loop: pumps store events to the engine, folds
/// engine events back into the store, handles input and drawing, and
/// keeps MPRIS in sync. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player,
    engine: &AudioEngine,
    player_rx: &mpsc::Receiver<PlayerEvent>,
    progress: &ProgressHandle,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    music_root: &Path,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Translate store mutations into engine commands.
        pump_player_events(player_rx, engine, music_root);

        // Fold engine notifications back into the store. Auto-advance may
        // emit further store events; those are pumped next iteration.
        while let Some(ev) = engine.poll_event() {
            match ev {
                AudioEvent::Duration(d) => player.set_duration(d),
                AudioEvent::TrackEnded => player.play_next(),
                AudioEvent::LoadFailed(_) => {
                    // Passive failure: the store keeps its state and the
                    // bar simply stops advancing.
                }
            }
        }
        pump_player_events(player_rx, engine, music_root);

        // Fold elapsed time from the engine's progress handle.
        if let Ok(p) = progress.lock() {
            player.set_position(p.elapsed);
        }

        // Keep MPRIS in sync even when changes come from media keys or auto-advance.
        let current_id = player.current().map(|t| t.id.clone());
        if current_id != state.last_mpris_track
            || player.playback_state() != state.last_mpris_playback
        {
            update_mpris(mpris, player, music_root);
            state.last_mpris_track = current_id;
            state.last_mpris_playback = player.playback_state();
        }

        app.clamp_queue_cursor(player.queue().len());
        terminal.draw(|f| ui::draw(f, app, player, settings))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, player, engine)? {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, engine, control_tx, state)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn pump_player_events(
    rx: &mpsc::Receiver<PlayerEvent>,
    engine: &AudioEngine,
    music_root: &Path,
) {
    while let Ok(ev) = rx.try_recv() {
        match ev {
            PlayerEvent::TrackChanged(track) => {
                let _ = engine.send(AudioCmd::Load(resolve_media_path(music_root, &track.file)));
            }
            PlayerEvent::Paused => {
                let _ = engine.send(AudioCmd::Pause);
            }
            PlayerEvent::Resumed => {
                let _ = engine.send(AudioCmd::Resume);
            }
        }
    }
}

fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player,
    engine: &AudioEngine,
) -> Result<bool, Box<dyn std::error::Error>> {
    match cmd {
        ControlCmd::Quit => {
            engine.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        ControlCmd::Play => match player.playback_state() {
            PlaybackState::Paused => player.toggle_play(),
            PlaybackState::Stopped => {
                if app.has_tracks() {
                    player.play_all(&app.all_tracks);
                }
            }
            PlaybackState::Playing => {}
        },
        ControlCmd::Pause => {
            if player.is_playing() {
                player.toggle_play();
            }
        }
        ControlCmd::PlayPause => match player.playback_state() {
            PlaybackState::Stopped => {
                if app.has_tracks() {
                    player.play_all(&app.all_tracks);
                }
            }
            PlaybackState::Playing | PlaybackState::Paused => player.toggle_play(),
        },
        ControlCmd::Stop => {
            // The store has no stop transition; the closest is pausing.
            if player.is_playing() {
                player.toggle_play();
            }
        }
        ControlCmd::Next => player.play_next(),
        ControlCmd::Prev => player.play_previous(),
    }

    Ok(false)
}

/// Length of the list the cursor is currently focused on.
fn visible_len(app: &App, settings: &config::Settings) -> usize {
    match app.screen {
        Screen::Home => match app.home_pane {
            HomePane::Popular => app.all_tracks.len().min(settings.ui.popular_count),
            HomePane::Discography => app.releases.len(),
        },
        Screen::Release(idx) => app.releases.get(idx).map(|r| r.tracks.len()).unwrap_or(0),
    }
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player,
    engine: &AudioEngine,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    if app.queue_open {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc | KeyCode::Char('o') => {
                app.close_queue();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                app.queue_next(player.queue().len());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.queue_prev(player.queue().len());
            }
            KeyCode::Enter => {
                let id = player
                    .queue()
                    .get(app.queue_selected)
                    .map(|t| t.id.clone());
                if let Some(id) = id {
                    player.jump_to_track(&id);
                    app.queue_selected = 0;
                }
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                let _ = control_tx.send(ControlCmd::PlayPause);
            }
            _ => {}
        }

        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            engine.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        KeyCode::Char('o') => {
            state.pending_gg = false;
            app.open_queue();
        }
        KeyCode::Tab => {
            state.pending_gg = false;
            app.cycle_home_pane();
        }
        KeyCode::Esc | KeyCode::Backspace => {
            state.pending_gg = false;
            app.back();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last(visible_len(app, settings));
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.select_next(visible_len(app, settings));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.select_prev(visible_len(app, settings));
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            activate_selection(app, player, settings);
        }
        KeyCode::Char('a') => {
            state.pending_gg = false;
            play_all_in_view(app, player, settings);
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}

/// Enter on the focused list: play a popular track, open a release, or
/// play a release track within its album context.
fn activate_selection(app: &mut App, player: &mut Player, settings: &config::Settings) {
    match app.screen {
        Screen::Home => match app.home_pane {
            HomePane::Popular => {
                let popular = player.popular_tracks(&app.all_tracks, settings.ui.popular_count);
                if let Some(track) = popular.get(app.popular_selected) {
                    player.select_track(track, None);
                }
            }
            HomePane::Discography => {
                app.open_selected_release();
            }
        },
        Screen::Release(idx) => {
            if let Some(release) = app.releases.get(idx) {
                if let Some(track) = release.tracks.get(app.track_selected) {
                    player.select_track(track, Some(&release.tracks));
                }
            }
        }
    }
}

/// `a` on the focused list: play the release (or popular set) from the top.
fn play_all_in_view(app: &App, player: &mut Player, settings: &config::Settings) {
    match app.screen {
        Screen::Home => match app.home_pane {
            HomePane::Popular => {
                let popular = player.popular_tracks(&app.all_tracks, settings.ui.popular_count);
                player.play_all(&popular);
            }
            HomePane::Discography => {
                if let Some(release) = app.releases.get(app.release_selected) {
                    player.play_all(&release.tracks);
                }
            }
        },
        Screen::Release(idx) => {
            if let Some(release) = app.releases.get(idx) {
                player.play_all(&release.tracks);
            }
        }
    }
}
