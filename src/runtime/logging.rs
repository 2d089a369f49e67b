use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingSettings};

/// Install the global `tracing` subscriber, writing to the configured log file.
///
/// The terminal belongs to the TUI, so nothing is ever logged to stdout or
/// stderr. `RUST_LOG` takes precedence over `logging.level`.
pub fn init(settings: &LoggingSettings) -> Result<PathBuf, Box<dyn Error + Send + Sync>> {
    let path = settings
        .file
        .clone()
        .or_else(config::default_log_path)
        .ok_or("no log file configured and no HOME to derive one from")?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()?;

    Ok(path)
}
