//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the TUI using `ratatui`. It only reads state: the
//! `App` model and the `PlaylistSession` are both passed in by the runtime.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, Equalizer, Hue};
use crate::config::{ControlsSettings, UiSettings};
use crate::playlist::{AudioSink, Direction as Walk, PlaybackState, PlaylistSession};

const CONTROLS: [(&str, &str); 8] = [
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("enter", "play selected"),
    ("space/p", "play/pause"),
    ("s", "stop"),
    ("h/l", "prev/next song"),
    ("H/L", ""),
    ("q", "quit"),
];

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_seconds: u64) -> String {
    CONTROLS
        .iter()
        .map(|(key, what)| {
            if *key == "H/L" {
                format!("[H/L] seek -/+{}s", seek_seconds)
            } else {
                format!("[{}] {}", key, what)
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn status_text<S: AudioSink>(app: &App, session: &PlaylistSession<S>) -> String {
    let mut parts: Vec<String> = Vec::new();

    match session.current_track_name() {
        Some(name) => {
            let state = session.state();
            if state == PlaybackState::Stopped {
                parts.push(format!("Song: {}", name));
            } else {
                parts.push(format!("Song: {} [{}]", name, format_mmss(session.position())));
            }
            parts.push(state.label().to_string());
        }
        None => parts.push("No song loaded".to_string()),
    }

    let mut count = format!("Tracks: {}", session.len());
    if app.loading {
        if app.roots.is_empty() {
            count.push_str(" (scanning…)");
        } else {
            let roots: Vec<String> = app.roots.iter().map(|r| r.display().to_string()).collect();
            count.push_str(&format!(" (scanning {}…)", roots.join(", ")));
        }
    }
    parts.push(count);

    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

/// Gutter mark for the current track in the list.
fn now_playing_marker<S: AudioSink>(session: &PlaylistSession<S>) -> &'static str {
    if session.is_playing() {
        "♪ "
    } else if session.is_paused() {
        "‖ "
    } else {
        "· "
    }
}

fn hue_color(hue: Hue) -> Color {
    match hue {
        Hue::Green => Color::Green,
        Hue::Red => Color::Red,
        Hue::Blue => Color::Blue,
        Hue::Yellow => Color::Yellow,
    }
}

fn draw_equalizer(frame: &mut Frame, area: Rect, equalizer: &Equalizer) {
    let bars: Vec<Bar> = equalizer
        .levels()
        .iter()
        .map(|level| {
            Bar::default()
                .value(level.height)
                .text_value(String::new())
                .style(Style::default().fg(hue_color(level.hue)))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(" equalizer "))
        .bar_width(2)
        .bar_gap(1)
        .max(Equalizer::MAX_HEIGHT)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

/// Render the entire UI into the provided `frame`.
pub fn draw<S: AudioSink>(
    frame: &mut Frame,
    app: &App,
    session: &PlaylistSession<S>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let eq_height = if app.equalizer.width() == 0 { 0 } else { 7 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(eq_height),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" orbit ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(app, session))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    if eq_height > 0 {
        draw_equalizer(frame, chunks[2], &app.equalizer);
    }

    // Main list
    {
        // Center the highlighted item when possible by creating a visible window.
        // Only build ListItems for the visible window (avoid allocating the entire list).
        let ring = session.tracks();
        let total = ring.len();
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let sel_pos = app.highlighted.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = sel_pos.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let current = session.cursor();
        let marker = now_playing_marker(session);
        let visible_items: Vec<ListItem> = ring
            .iter_from(start, Walk::Forward)
            .map(|walk| {
                walk.take(end - start)
                    .map(|(pos, track)| {
                        let marker = if Some(pos) == current { marker } else { "  " };
                        ListItem::new(format!("{}{}", marker, track.display))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if !session.is_empty() {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    let footer = Paragraph::new(controls_text(controls_settings.seek_seconds))
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

    frame.render_widget(footer, chunks[4]);
}
