//! Track model and background discovery of audio files.
//!
//! The loader walks the configured directories on its own thread and streams
//! every matching file back to the event loop, which appends it to the
//! playlist as it arrives.

mod display;
mod loader;
mod model;

pub use loader::{LoaderEvent, spawn_loader};
pub use model::Track;
