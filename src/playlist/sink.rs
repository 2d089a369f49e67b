//! The audio output capability the controller drives.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::library::Track;

/// Something that can actually make sound from a `Track`.
///
/// Calls are synchronous and expected to return quickly; the sink is the
/// source of truth for elapsed time.
pub trait AudioSink {
    /// Prepare `track` for playback without starting it.
    fn load(&mut self, track: &Track) -> Result<(), SinkError>;
    fn play(&mut self) -> Result<(), SinkError>;
    fn pause(&mut self) -> Result<(), SinkError>;
    fn resume(&mut self) -> Result<(), SinkError>;
    fn stop(&mut self) -> Result<(), SinkError>;
    /// Restart the loaded track at `offset`, keeping the paused/playing status.
    fn play_from(&mut self, offset: Duration) -> Result<(), SinkError>;
    /// Elapsed time into the loaded track.
    fn position(&self) -> Duration;

    /// Whether the loaded track has played through to its end.
    fn is_finished(&self) -> bool {
        false
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("no audio output device: {0}")]
    Device(String),

    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("no track is loaded")]
    NothingLoaded,
}
