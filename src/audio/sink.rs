//! `AudioSink` backed by a `rodio` output stream.
//!
//! Each load (and each seek) decodes the file into a fresh paused `Sink`
//! positioned at the requested offset.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use crate::library::Track;
use crate::playlist::{AudioSink, SinkError};

pub struct RodioSink {
    stream: OutputStream,
    sink: Option<Sink>,
    loaded: Option<PathBuf>,
    /// Where the current `Sink` started inside the file.
    offset: Duration,
}

impl RodioSink {
    /// Open the default output device.
    pub fn open() -> Result<Self, SinkError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| SinkError::Device(err.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the TUI on exit.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            loaded: None,
            offset: Duration::ZERO,
        })
    }

    fn current(&self) -> Result<&Sink, SinkError> {
        self.sink.as_ref().ok_or(SinkError::NothingLoaded)
    }

    fn drop_sink(&mut self) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
    }
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
fn create_sink_at(stream: &OutputStream, path: &Path, start_at: Duration) -> Result<Sink, SinkError> {
    let file = File::open(path).map_err(|source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|err| SinkError::Decode {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

impl AudioSink for RodioSink {
    fn load(&mut self, track: &Track) -> Result<(), SinkError> {
        self.drop_sink();
        self.loaded = None;
        self.offset = Duration::ZERO;

        let sink = create_sink_at(&self.stream, &track.path, Duration::ZERO)?;
        self.sink = Some(sink);
        self.loaded = Some(track.path.clone());
        Ok(())
    }

    fn play(&mut self) -> Result<(), SinkError> {
        self.current()?.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), SinkError> {
        self.current()?.pause();
        Ok(())
    }

    fn resume(&mut self) -> Result<(), SinkError> {
        self.current()?.play();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SinkError> {
        self.drop_sink();
        self.offset = Duration::ZERO;
        Ok(())
    }

    fn play_from(&mut self, offset: Duration) -> Result<(), SinkError> {
        let path = self.loaded.clone().ok_or(SinkError::NothingLoaded)?;
        let was_paused = self.sink.as_ref().is_none_or(|s| s.is_paused());

        // Rebuild the sink and skip into the file.
        let fresh = create_sink_at(&self.stream, &path, offset)?;
        self.drop_sink();
        if !was_paused {
            fresh.play();
        }
        debug!(path = %path.display(), offset_ms = offset.as_millis() as u64, "sink restarted");
        self.sink = Some(fresh);
        self.offset = offset;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.offset + self.sink.as_ref().map_or(Duration::ZERO, |s| s.get_pos())
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.is_paused() && s.empty())
    }
}
