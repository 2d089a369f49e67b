use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::config;
use crate::library::LoaderEvent;
use crate::playlist::{AudioSink, Direction, PlaybackState, PlaylistError, PlaylistSession};
use crate::ui;

/// What a key press asks for, independent of the terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Down,
    Up,
    Top,
    Bottom,
    PlayHighlighted,
    PlayPause,
    Stop,
    Next,
    Prev,
    SeekForward,
    SeekBack,
}

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// When the equalizer was last refreshed.
    pub last_equalizer_tick: Option<Instant>,
}

/// Main terminal event loop: drains the loader, handles input and redraws.
/// Returns `Ok(())` when shutdown is requested.
pub fn run<S: AudioSink>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &mut PlaylistSession<S>,
    loader: &Receiver<LoaderEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let equalizer_every = Duration::from_millis(settings.ui.equalizer_interval_ms);
    let tick = Duration::from_millis(settings.ui.tick_ms);

    loop {
        drain_loader(loader, app, session);

        match session.poll_end_of_track(settings.playback.auto_advance) {
            Ok(Some(pos)) => app.follow(Some(pos)),
            Ok(None) => {}
            Err(err) => report(app, &err),
        }
        if session.state() == PlaybackState::Stopped {
            app.equalizer.clear();
        }

        let due = state
            .last_equalizer_tick
            .is_none_or(|last| last.elapsed() >= equalizer_every);
        if due {
            app.equalizer.tick(session.is_playing(), &mut rng);
            state.last_equalizer_tick = Some(Instant::now());
        }

        terminal.draw(|f| ui::draw(f, app, session, &settings.ui, &settings.controls))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(action) = action_for(key, state) else {
                    continue;
                };
                if dispatch(action, settings, app, session) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Append every track the loader has found since the last iteration.
pub fn drain_loader<S: AudioSink>(
    loader: &Receiver<LoaderEvent>,
    app: &mut App,
    session: &mut PlaylistSession<S>,
) {
    loop {
        match loader.try_recv() {
            Ok(LoaderEvent::Found(track)) => {
                session.append(track);
            }
            Ok(LoaderEvent::Finished { found }) => {
                info!(found, total = session.len(), "playlist loaded");
                app.finish_loading(Some(found));
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                if app.loading {
                    warn!("loader went away without finishing");
                    app.finish_loading(None);
                }
                break;
            }
        }
    }
}

/// Map a key press to an action, handling the `gg` prefix.
pub fn action_for(key: KeyEvent, state: &mut EventLoopState) -> Option<Action> {
    if key.code == KeyCode::Char('g') {
        if state.pending_gg {
            state.pending_gg = false;
            return Some(Action::Top);
        }
        state.pending_gg = true;
        return None;
    }
    // g pending should clear on any other key
    state.pending_gg = false;

    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Char('G') => Action::Bottom,
        KeyCode::Enter => Action::PlayHighlighted,
        KeyCode::Char('p') | KeyCode::Char(' ') => Action::PlayPause,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('l') => Action::Next,
        KeyCode::Char('h') => Action::Prev,
        KeyCode::Char('L') => Action::SeekForward,
        KeyCode::Char('H') => Action::SeekBack,
        _ => return None,
    };
    Some(action)
}

/// Apply `action` to the session and app. Returns `true` when the user quits.
pub fn dispatch<S: AudioSink>(
    action: Action,
    settings: &config::Settings,
    app: &mut App,
    session: &mut PlaylistSession<S>,
) -> bool {
    let len = session.len();
    let seek = settings.controls.seek_seconds as f64;

    let outcome = match action {
        Action::Quit => {
            if let Err(err) = session.stop() {
                warn!(%err, "stop on quit failed");
            }
            return true;
        }
        Action::Down => {
            app.next(len);
            return false;
        }
        Action::Up => {
            app.prev(len);
            return false;
        }
        Action::Top => {
            app.select_first();
            return false;
        }
        Action::Bottom => {
            app.select_last(len);
            return false;
        }
        Action::PlayHighlighted => session
            .select_by_display_index(app.highlighted)
            .and_then(|_| session.toggle_play_pause())
            .map(|_| ()),
        Action::PlayPause => session.toggle_play_pause().map(|_| ()),
        Action::Stop => session.stop(),
        Action::Next => session.advance(Direction::Forward).map(|_| ()),
        Action::Prev => session.advance(Direction::Backward).map(|_| ()),
        Action::SeekForward => session.seek_relative(seek).map(|_| ()),
        Action::SeekBack => session.seek_relative(-seek).map(|_| ()),
    };

    match outcome {
        Ok(()) => {
            app.clear_status();
            if matches!(action, Action::Next | Action::Prev) {
                app.follow(session.cursor());
            }
        }
        Err(err) => report(app, &err),
    }
    if session.state() == PlaybackState::Stopped {
        app.equalizer.clear();
    }
    false
}

fn report(app: &mut App, err: &PlaylistError) {
    if err.is_invariant_violation() {
        warn!(%err, "playlist invariant violated");
    } else {
        info!(%err, "transport command rejected");
    }
    app.report(err);
}
