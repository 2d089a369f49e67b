//! Application module: presentation state used by the TUI and runtime.
//!
//! The `App` model lives in `app::model`; the equalizer animation in
//! `app::equalizer`.

mod equalizer;
mod model;

pub use equalizer::{Equalizer, Hue};
pub use model::*;
