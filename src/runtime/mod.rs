use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::AudioEngine;
use crate::mpris::ControlCmd;
use crate::player::{Player, PlayerEvent};

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let (mut app, music_root) = startup::build_app(&settings);

    let engine = AudioEngine::new(settings.audio.clone());
    let progress = engine.progress_handle();

    // The store is constructed once here and passed by reference to every
    // consumer; its events reach the engine through this channel.
    let mut player = Player::new();
    let (player_tx, player_rx) = mpsc::channel::<PlayerEvent>();
    player.subscribe(Box::new(move |ev| {
        let _ = player_tx.send(ev.clone());
    }));

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    mpris_sync::update_mpris(&mpris, &player, &music_root);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&player);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut player,
            &engine,
            &player_rx,
            &progress,
            &mpris,
            &control_tx,
            &control_rx,
            &music_root,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
