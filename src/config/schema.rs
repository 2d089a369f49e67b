use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/orbit/config.toml` or `~/.config/orbit/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ORBIT__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    /// File name with extension (`song.mp3`).
    #[serde(alias = "basename")]
    Filename,
    /// File name without extension (`song`).
    Stem,
    /// Full path as discovered.
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directories to scan when none are given on the command line.
    /// Empty means the home directory.
    pub roots: Vec<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Which part of the path is shown in the track list.
    pub display: TrackDisplayField,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            extensions: vec!["mp3".into(), "wav".into(), "ogg".into(), "flac".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
            display: TrackDisplayField::Filename,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing `H` / `L`.
    pub seek_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { seek_seconds: 10 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Move on to the next track when the current one ends.
    pub auto_advance: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { auto_advance: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How long the event loop waits for input before redrawing (milliseconds).
    pub tick_ms: u64,
    /// Number of bars in the equalizer animation. 0 hides it.
    pub equalizer_bars: usize,
    /// How often the equalizer is refreshed while playing (milliseconds).
    pub equalizer_interval_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ round and round it goes ~ ".to_string(),
            tick_ms: 50,
            equalizer_bars: 10,
            equalizer_interval_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `info` or `orbit=debug`. `RUST_LOG` wins.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/orbit/orbit.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
