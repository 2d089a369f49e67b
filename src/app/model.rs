//! Application model: presentation state that lives next to the playlist
//! session but is not part of it.
//!
//! `App` holds the list highlight, the status line, the loading flag and the
//! equalizer. The session itself is passed alongside it, never stored here.

use std::path::PathBuf;

use crate::playlist::PlaylistError;

use super::equalizer::Equalizer;

pub struct App {
    /// Row highlighted in the track list (not necessarily the current track).
    pub highlighted: usize,
    /// One-line message shown in the status box.
    pub status: Option<String>,
    /// True until the loader reports it has walked every root.
    pub loading: bool,
    pub roots: Vec<PathBuf>,
    pub equalizer: Equalizer,
}

impl App {
    pub fn new(roots: Vec<PathBuf>, equalizer_bars: usize) -> Self {
        Self {
            highlighted: 0,
            status: None,
            loading: true,
            roots,
            equalizer: Equalizer::new(equalizer_bars),
        }
    }

    /// Move the highlight down, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.highlighted = (self.highlighted + 1) % len;
    }

    /// Move the highlight up, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.highlighted = (self.highlighted + len - 1) % len;
    }

    pub fn select_first(&mut self) {
        self.highlighted = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        self.highlighted = len.saturating_sub(1);
    }

    /// Put the highlight on the session's current track.
    pub fn follow(&mut self, cursor: Option<usize>) {
        if let Some(pos) = cursor {
            self.highlighted = pos;
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Turn a transport error into a user-facing status message.
    pub fn report(&mut self, err: &PlaylistError) {
        let msg = match err {
            PlaylistError::EmptyCollection => {
                if self.loading {
                    "still looking for tracks…".to_string()
                } else {
                    "playlist is empty".to_string()
                }
            }
            PlaylistError::NoTrackSelected => "no track loaded".to_string(),
            other => other.to_string(),
        };
        self.set_status(msg);
    }

    /// Record that discovery is over.
    pub fn finish_loading(&mut self, found: Option<usize>) {
        self.loading = false;
        match found {
            Some(0) => self.set_status("no audio files found"),
            Some(n) => self.set_status(format!("playlist loaded: {n} tracks")),
            None => self.set_status("track discovery stopped early"),
        }
    }
}
