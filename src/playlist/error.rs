use thiserror::Error;

use super::sink::SinkError;

/// Errors raised by ring lookups and transport commands.
///
/// All of these are recoverable: the runtime turns them into a status line
/// message. `NotFound` is the only one that points at a bug.
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// A read or traversal was attempted on a ring with zero tracks.
    #[error("playlist is empty")]
    EmptyCollection,

    /// A neighbour lookup was given a position that is not in the ring.
    #[error("position {0} is not in the playlist")]
    NotFound(usize),

    /// Positional lookup on an empty ring.
    #[error("index {0} is out of range")]
    IndexOutOfRange(usize),

    /// Play was requested with no current track.
    #[error("no track loaded")]
    NoTrackSelected,

    /// The audio sink failed; playback has been reset to stopped.
    #[error("audio sink failed: {0}")]
    Sink(#[from] SinkError),
}

impl PlaylistError {
    /// True when the error means the cursor and the ring disagree.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, PlaylistError>;
