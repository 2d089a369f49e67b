//! Audio output: the `rodio` implementation of the playlist's sink.

mod sink;

pub use sink::RodioSink;
