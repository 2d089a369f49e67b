use std::path::PathBuf;

use crate::config;

/// Pick the directories to scan.
///
/// Command-line arguments win, then `library.roots`, then the home
/// directory, then the working directory.
pub fn resolve_roots(
    args: Vec<PathBuf>,
    settings: &config::LibrarySettings,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    if !args.is_empty() {
        return args;
    }
    if !settings.roots.is_empty() {
        return settings.roots.clone();
    }
    home.or_else(|| std::env::current_dir().ok())
        .map(|dir| vec![dir])
        .unwrap_or_else(|| vec![PathBuf::from(".")])
}
