//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`: the
//! home and release pages, the persistent player bar and the queue
//! sidebar. Everything here is a pure function of the navigation model,
//! the playback store and the settings.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{App, HomePane, Screen};
use crate::catalog::{ARTIST_NAME, Track, latest_release};
use crate::config::{Settings, TimeField, TrackDisplayField, UiSettings};
use crate::player::Player;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("tab".to_string(), "switch pane".to_string());
    map.insert("enter".to_string(), "play / open".to_string());
    map.insert("a".to_string(), "play all".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    map.insert("o".to_string(), "queue".to_string());
    map.insert("esc".to_string(), "back/close".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "h/l", "tab", "enter", "a", "space/p", "o", "gg/G", "esc", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the "now playing" track text according to `ui` settings.
fn now_playing_track_text(track: &Track, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in &ui.now_playing_track_fields {
        match f {
            TrackDisplayField::Display => {
                if !track.display.trim().is_empty() {
                    parts.push(track.display.clone());
                }
            }
            TrackDisplayField::Title => {
                if !track.title.trim().is_empty() {
                    parts.push(track.title.clone());
                }
            }
            TrackDisplayField::Artist => {
                let artist = track.artist.as_deref().unwrap_or(ARTIST_NAME);
                if !artist.trim().is_empty() {
                    parts.push(artist.trim().to_string());
                }
            }
            TrackDisplayField::Album => {
                if let Some(a) = track
                    .album
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(stem) = std::path::Path::new(&track.file)
                    .file_stem()
                    .and_then(|s| s.to_str())
                {
                    if !stem.trim().is_empty() {
                        parts.push(stem.to_string());
                    }
                }
            }
            TrackDisplayField::File => {
                parts.push(track.file.clone());
            }
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(&ui.now_playing_track_separator)
    }
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    if ui.now_playing_time_fields.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    let rem = t.saturating_sub(elapsed);
                    parts.push(format!("-{}", format_mmss(rem)));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, player: &Player, settings: &Settings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", ARTIST_NAME))
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    match app.screen {
        Screen::Home => draw_home(frame, chunks[1], app, player, settings),
        Screen::Release(_) => draw_release(frame, chunks[1], app, settings),
    }

    if app.queue_open {
        draw_queue(frame, chunks[1], app, player);
    }

    draw_player_bar(frame, chunks[2], app, player, &settings.ui);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn draw_home(frame: &mut Frame, area: Rect, app: &App, player: &Player, settings: &Settings) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    // Latest release banner
    let latest = match latest_release(&app.releases) {
        Some(r) => format!(
            "{} · {} · {} · {} track{}",
            r.title,
            r.year,
            r.kind.label(),
            r.tracks.len(),
            if r.tracks.len() == 1 { "" } else { "s" }
        ),
        None => "no releases".to_string(),
    };
    let latest_par = Paragraph::new(latest).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" latest release ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(latest_par, rows[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    // Popular pane
    let popular = player.popular_tracks(&app.all_tracks, settings.ui.popular_count);
    let popular_items: Vec<ListItem> = popular
        .iter()
        .map(|t| {
            let count = player.play_count(&t.id);
            ListItem::new(format!("{}  ({} plays)", t.display, count))
        })
        .collect();
    let popular_list = List::new(popular_items)
        .block(Block::default().borders(Borders::ALL).title(" popular "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut popular_state = ListState::default();
    if app.home_pane == HomePane::Popular && !popular.is_empty() {
        popular_state.select(Some(app.popular_selected.min(popular.len() - 1)));
    }
    frame.render_stateful_widget(popular_list, panes[0], &mut popular_state);

    // Discography pane
    let disco_items: Vec<ListItem> = app
        .releases
        .iter()
        .map(|r| ListItem::new(format!("{} · {} · {}", r.title, r.year, r.kind.label())))
        .collect();
    let disco_list = List::new(disco_items)
        .block(Block::default().borders(Borders::ALL).title(" discography "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut disco_state = ListState::default();
    if app.home_pane == HomePane::Discography && !app.releases.is_empty() {
        disco_state.select(Some(app.release_selected.min(app.releases.len() - 1)));
    }
    frame.render_stateful_widget(disco_list, panes[1], &mut disco_state);
}

fn draw_release(frame: &mut Frame, area: Rect, app: &App, _settings: &Settings) {
    let Some(release) = app.current_release() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let banner = format!(
        "{} · {} · {} · {}",
        release.artist.as_deref().unwrap_or(ARTIST_NAME),
        release.year,
        release.kind.label(),
        release.cover,
    );
    let banner_par = Paragraph::new(banner).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ({}) ", release.title, release.slug))
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(banner_par, rows[0]);

    let items: Vec<ListItem> = release
        .tracks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let time = t.duration.map(format_mmss).unwrap_or_else(|| "--:--".into());
            ListItem::new(format!("{:2}. {}  [{}]", i + 1, t.display, time))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !release.tracks.is_empty() {
        state.select(Some(app.track_selected.min(release.tracks.len() - 1)));
    }
    frame.render_stateful_widget(list, rows[1], &mut state);
}

/// Queue sidebar overlay: now playing on top, up-next below, drawn over
/// the right edge of the body area.
fn draw_queue(frame: &mut Frame, area: Rect, app: &App, player: &Player) {
    let width = area.width.min(44);
    let sidebar = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width,
        height: area.height,
    };
    frame.render_widget(Clear, sidebar);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(sidebar);

    let now_playing = player
        .current()
        .map(|t| t.display.clone())
        .unwrap_or_else(|| "-".to_string());
    let now_par = Paragraph::new(now_playing).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" now playing ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(now_par, rows[0]);

    let items: Vec<ListItem> = player
        .queue()
        .iter()
        .map(|t| ListItem::new(t.display.clone()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" up next (enter jumps) "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !player.queue().is_empty() {
        state.select(Some(app.queue_selected.min(player.queue().len() - 1)));
    }
    frame.render_stateful_widget(list, rows[1], &mut state);
}

/// The persistent bottom player bar. Tolerates an empty session by
/// rendering a placeholder.
fn draw_player_bar(frame: &mut Frame, area: Rect, app: &App, player: &Player, ui: &UiSettings) {
    let block = Block::default().borders(Borders::ALL).title(" player ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(track) = player.current() else {
        let placeholder = match &app.music_dir {
            Some(dir) => format!("nothing playing - pick a track and press enter (library: {dir})"),
            None => "nothing playing - pick a track and press enter".to_string(),
        };
        frame.render_widget(Paragraph::new(placeholder).wrap(Wrap { trim: true }), inner);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let state = if player.is_playing() { "Playing" } else { "Paused" };
    let upcoming = player.queue().len();
    let line = format!(
        "{}: {}  ·  {} upcoming",
        state,
        now_playing_track_text(track, ui),
        upcoming
    );
    frame.render_widget(Paragraph::new(line), rows[0]);

    let ratio = match player.duration() {
        Some(total) if total > Duration::ZERO => {
            (player.position().as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    };
    let label = now_playing_time_text(player.position(), player.duration(), ui)
        .unwrap_or_else(|| format_mmss(player.position()));
    let gauge = Gauge::default().ratio(ratio).label(label);
    frame.render_widget(gauge, rows[1]);
}
