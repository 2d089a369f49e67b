//! Transport state machine.
//!
//! `PlaybackController` owns the audio sink and the current `PlaybackState`.
//! Every transport command validates against the current state, applies the
//! transition and issues the matching sink calls. A sink failure always
//! leaves the controller `Stopped`.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::library::Track;

use super::error::{PlaylistError, Result};
use super::sink::{AudioSink, SinkError};

/// The playback state of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        }
    }
}

pub struct PlaybackController<S> {
    sink: S,
    state: PlaybackState,
}

impl<S: AudioSink> PlaybackController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: PlaybackState::Stopped,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Elapsed time as reported by the sink.
    pub fn position(&self) -> Duration {
        self.sink.position()
    }

    /// Single play/pause entry point: start, pause or resume depending on state.
    ///
    /// Starting from `Stopped` needs a `track`; without one the state is left
    /// alone and `NoTrackSelected` is returned.
    pub fn toggle_play(&mut self, track: Option<&Track>) -> Result<PlaybackState> {
        let next = match self.state {
            PlaybackState::Stopped => {
                let Some(track) = track else {
                    return Err(PlaylistError::NoTrackSelected);
                };
                debug!(path = %track.path.display(), "loading track");
                self.guarded(|sink| {
                    sink.load(track)?;
                    sink.play()
                })?;
                PlaybackState::Playing
            }
            PlaybackState::Playing => {
                self.guarded(|sink| sink.pause())?;
                PlaybackState::Paused
            }
            PlaybackState::Paused => {
                self.guarded(|sink| sink.resume())?;
                PlaybackState::Playing
            }
        };
        self.transition(next);
        Ok(next)
    }

    /// Stop playback. A no-op when already stopped.
    pub fn stop(&mut self) -> Result<()> {
        if self.state == PlaybackState::Stopped {
            return Ok(());
        }
        self.halt()
    }

    /// Stop whatever is playing before the cursor moves to another track.
    ///
    /// The sink is always told to stop, whatever the current state.
    pub fn select_track(&mut self) -> Result<()> {
        self.halt()
    }

    /// Restart the current track `delta_secs` away from the sink's position.
    ///
    /// The target never goes below zero. Returns the offset handed to the
    /// sink, or `None` when stopped (nothing to seek in).
    pub fn seek_relative(&mut self, delta_secs: f64) -> Result<Option<Duration>> {
        if self.state == PlaybackState::Stopped {
            return Ok(None);
        }
        let target = seek_target(self.sink.position(), delta_secs);
        debug!(target_ms = target.as_millis() as u64, delta_secs, "seeking");
        self.guarded(|sink| sink.play_from(target))?;
        Ok(Some(target))
    }

    /// Unconditionally reset to `Stopped`, ignoring sink errors.
    pub fn force_stop(&mut self) {
        if let Err(err) = self.sink.stop() {
            debug!(%err, "sink stop failed during forced stop");
        }
        self.transition(PlaybackState::Stopped);
    }

    fn halt(&mut self) -> Result<()> {
        let stopped = self.sink.stop();
        self.transition(PlaybackState::Stopped);
        stopped.map_err(|err| {
            warn!(%err, "sink failed to stop");
            PlaylistError::from(err)
        })
    }

    fn guarded<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&mut S) -> std::result::Result<(), SinkError>,
    {
        match op(&mut self.sink) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(%err, state = ?self.state, "sink call failed, stopping playback");
                self.force_stop();
                Err(err.into())
            }
        }
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            info!(from = ?self.state, to = ?next, "playback state changed");
        }
        self.state = next;
    }
}

/// Zero floor. Targets too large for a `Duration` saturate instead of wrapping.
fn seek_target(current: Duration, delta_secs: f64) -> Duration {
    let secs = current.as_secs_f64() + delta_secs;
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
