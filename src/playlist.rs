//! Playlist core: the circular track ring, the transport state machine and
//! the session that composes them behind a cursor.
//!
//! Nothing in here touches the terminal or the filesystem. Audio output is
//! reached only through the [`AudioSink`] trait.

mod controller;
mod error;
mod ring;
mod session;
mod sink;

pub use controller::{PlaybackController, PlaybackState};
pub use error::{PlaylistError, Result};
pub use ring::{Direction, TrackRing};
pub use session::PlaylistSession;
pub use sink::{AudioSink, SinkError};

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
