use std::path::PathBuf;

use crate::config::TrackDisplayField;

use super::display::display_name;

/// A playable file. The path is the identifier understood by the sink; the
/// display name is derived from it once, when the track is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub display: String,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>, field: TrackDisplayField) -> Self {
        let path = path.into();
        let display = display_name(&path, field);
        Self { path, display }
    }
}
