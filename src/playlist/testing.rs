//! Test doubles for the playlist core.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::TrackDisplayField;
use crate::library::Track;

use super::sink::{AudioSink, SinkError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Load(PathBuf),
    Play,
    Pause,
    Resume,
    Stop,
    PlayFrom(Duration),
}

/// A sink operation, used to script which call should fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SinkOp {
    Load,
    Play,
    Pause,
    Resume,
    Stop,
    PlayFrom,
}

/// Sink that records every call and reports a scripted position.
///
/// Calls are recorded even when `fail_on` makes them fail.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
    pub position: Duration,
    pub finished: bool,
    pub fail_on: Option<SinkOp>,
}

impl RecordingSink {
    pub fn at(position: Duration) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn failing(op: SinkOp) -> Self {
        Self {
            fail_on: Some(op),
            ..Self::default()
        }
    }

    fn check(&self, op: SinkOp) -> Result<(), SinkError> {
        if self.fail_on == Some(op) {
            return Err(SinkError::Device(format!("{op:?} failed")));
        }
        Ok(())
    }
}

impl AudioSink for RecordingSink {
    fn load(&mut self, track: &Track) -> Result<(), SinkError> {
        self.calls.push(SinkCall::Load(track.path.clone()));
        if self.fail_on == Some(SinkOp::Load) {
            return Err(SinkError::Decode {
                path: track.path.clone(),
                reason: "corrupt".to_string(),
            });
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), SinkError> {
        self.calls.push(SinkCall::Play);
        self.check(SinkOp::Play)
    }

    fn pause(&mut self) -> Result<(), SinkError> {
        self.calls.push(SinkCall::Pause);
        self.check(SinkOp::Pause)
    }

    fn resume(&mut self) -> Result<(), SinkError> {
        self.calls.push(SinkCall::Resume);
        self.check(SinkOp::Resume)
    }

    fn stop(&mut self) -> Result<(), SinkError> {
        self.calls.push(SinkCall::Stop);
        self.check(SinkOp::Stop)
    }

    fn play_from(&mut self, offset: Duration) -> Result<(), SinkError> {
        self.calls.push(SinkCall::PlayFrom(offset));
        self.check(SinkOp::PlayFrom)?;
        self.position = offset;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

pub fn track(name: &str) -> Track {
    Track::new(
        PathBuf::from("/music").join(format!("{name}.mp3")),
        TrackDisplayField::Stem,
    )
}
