use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, warn};

use crate::app::App;
use crate::audio::RodioSink;
use crate::config;
use crate::library::spawn_loader;
use crate::playlist::PlaylistSession;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(path) => info!(path = %path.display(), "logging initialised"),
        Err(e) => eprintln!("orbit: logging disabled: {e}"),
    }
    if let Some(reason) = fallback {
        warn!("{reason}");
    }

    let args: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    let roots = startup::resolve_roots(args, &settings.library, config::home_dir());
    info!(?roots, "starting");

    let sink = RodioSink::open().inspect_err(|e| error!(%e, "could not open audio output"))?;
    let mut session = PlaylistSession::new(sink);
    let loader = spawn_loader(roots.clone(), settings.library.clone());
    let mut app = App::new(roots, settings.ui.equalizer_bars);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut session,
            &loader,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        error!(%e, "event loop failed");
    }
    info!("shutting down");
    run_result
}
