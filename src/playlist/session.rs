//! The public face of the playlist: ring + cursor + controller.

use std::time::Duration;

use tracing::{debug, error, info};

use crate::library::Track;

use super::controller::{PlaybackController, PlaybackState};
use super::error::{PlaylistError, Result};
use super::ring::{Direction, TrackRing};
use super::sink::AudioSink;

/// Owns the track ring, the cursor into it and the playback controller.
///
/// The cursor only moves through `select_by_display_index` and `advance`,
/// plus the one-time initialisation on the first append.
pub struct PlaylistSession<S> {
    ring: TrackRing,
    cursor: Option<usize>,
    controller: PlaybackController<S>,
}

impl<S: AudioSink> PlaylistSession<S> {
    pub fn new(sink: S) -> Self {
        Self {
            ring: TrackRing::new(),
            cursor: None,
            controller: PlaybackController::new(sink),
        }
    }

    /// Add a discovered track. The first track ever appended becomes current.
    pub fn append(&mut self, track: Track) -> usize {
        let pos = self.ring.append(track);
        if self.cursor.is_none() {
            debug!(pos, "cursor initialised on first track");
            self.cursor = Some(pos);
        }
        pos
    }

    /// Make the `index`-th track current, stopping playback.
    ///
    /// Indices past the end wrap around the ring.
    pub fn select_by_display_index(&mut self, index: usize) -> Result<usize> {
        if self.ring.is_empty() {
            return Err(PlaylistError::EmptyCollection);
        }
        let pos = self.ring.nth(index)?;
        let stopped = self.controller.select_track();
        self.cursor = Some(pos);
        stopped?;
        Ok(pos)
    }

    /// Move to the neighbouring track and start playing it.
    pub fn advance(&mut self, direction: Direction) -> Result<usize> {
        if self.ring.is_empty() {
            return Err(PlaylistError::EmptyCollection);
        }
        let current = self.cursor.ok_or(PlaylistError::NoTrackSelected)?;
        let stepped = match direction {
            Direction::Forward => self.ring.successor(current),
            Direction::Backward => self.ring.predecessor(current),
        };
        let next = match stepped {
            Ok(next) => next,
            Err(err) => {
                if err.is_invariant_violation() {
                    error!(%err, current, len = self.ring.len(), "cursor points outside the playlist");
                    self.controller.force_stop();
                }
                return Err(err);
            }
        };

        let stopped = self.controller.select_track();
        self.cursor = Some(next);
        stopped?;
        self.controller.toggle_play(self.ring.get(next))?;
        Ok(next)
    }

    pub fn toggle_play_pause(&mut self) -> Result<PlaybackState> {
        if self.ring.is_empty() {
            return Err(PlaylistError::EmptyCollection);
        }
        let track = self.cursor.and_then(|pos| self.ring.get(pos));
        self.controller.toggle_play(track)
    }

    pub fn stop(&mut self) -> Result<()> {
        self.controller.stop()
    }

    pub fn seek_relative(&mut self, delta_secs: f64) -> Result<Option<Duration>> {
        if self.ring.is_empty() {
            return Err(PlaylistError::EmptyCollection);
        }
        self.controller.seek_relative(delta_secs)
    }

    /// React to the sink running off the end of the current track.
    ///
    /// Returns the new cursor position when playback moved on.
    pub fn poll_end_of_track(&mut self, auto_advance: bool) -> Result<Option<usize>> {
        if !self.controller.is_playing() || !self.controller.sink().is_finished() {
            return Ok(None);
        }
        info!(auto_advance, "track finished");
        if auto_advance {
            self.advance(Direction::Forward).map(Some)
        } else {
            self.controller.stop().map(|()| None)
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.cursor.and_then(|pos| self.ring.get(pos))
    }

    pub fn current_track_name(&self) -> Option<&str> {
        self.current_track().map(|t| t.display.as_str())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn is_paused(&self) -> bool {
        self.controller.is_paused()
    }

    /// Elapsed time in the current track.
    pub fn position(&self) -> Duration {
        self.controller.position()
    }

    pub fn tracks(&self) -> &TrackRing {
        &self.ring
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn sink(&self) -> &S {
        self.controller.sink()
    }
}
