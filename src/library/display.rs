use std::path::Path;

use crate::config::TrackDisplayField;

/// Build the list label for `path` according to `field`.
///
/// Falls back to the full path when the requested component is missing or
/// blank (e.g. a root directory or a name that is not valid UTF-8).
pub fn display_name(path: &Path, field: TrackDisplayField) -> String {
    let part = match field {
        TrackDisplayField::Filename => path.file_name().and_then(|s| s.to_str()),
        TrackDisplayField::Stem => path.file_stem().and_then(|s| s.to_str()),
        TrackDisplayField::Path => None,
    };

    match part.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name.to_string(),
        None => path.display().to_string(),
    }
}
