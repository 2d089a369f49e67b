use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

/// Progress reported by the loader thread.
#[derive(Debug)]
pub enum LoaderEvent {
    /// A matching file was found; it should be appended right away.
    Found(Track),
    /// Every root has been walked.
    Finished { found: usize },
}

/// Start walking `roots` on a background thread.
///
/// The thread never touches the playlist: it sends each track over the
/// returned channel and stops early once the receiver is dropped.
pub fn spawn_loader(roots: Vec<PathBuf>, settings: LibrarySettings) -> Receiver<LoaderEvent> {
    let (tx, rx) = mpsc::channel::<LoaderEvent>();

    let spawned = thread::Builder::new()
        .name("orbit-loader".to_string())
        .spawn(move || {
            info!(roots = roots.len(), "track discovery started");
            let found = scan_into(&roots, &settings, |track| {
                tx.send(LoaderEvent::Found(track)).is_ok()
            });
            info!(found, "track discovery finished");
            let _ = tx.send(LoaderEvent::Finished { found });
        });

    if let Err(err) = spawned {
        // The sender went down with the closure, so the receiver reports
        // a disconnect and the event loop stops waiting for tracks.
        warn!(%err, "failed to spawn loader thread");
    }

    rx
}

/// Walk every root in order and hand each matching file to `emit`.
///
/// `emit` returns `false` to abort the walk. Returns how many tracks were
/// emitted.
pub(super) fn scan_into<F>(roots: &[PathBuf], settings: &LibrarySettings, mut emit: F) -> usize
where
    F: FnMut(Track) -> bool,
{
    let exts = normalized_extensions(settings);
    let mut found = 0;

    for root in roots {
        let mut walker = WalkDir::new(root)
            .follow_links(settings.follow_links)
            .sort_by_file_name();

        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        let entries = walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!(%err, "skipping unreadable entry");
                    None
                }
            });

        for entry in entries {
            let path = entry.path();
            if !path.is_file() || !has_extension(path, &exts) {
                continue;
            }
            if !emit(Track::new(path, settings.display)) {
                debug!(found, "receiver gone, stopping discovery");
                return found;
            }
            found += 1;
        }
    }

    found
}

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
