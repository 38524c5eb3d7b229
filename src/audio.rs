//! Audio engine adapter.
//!
//! The engine owns the output device on a dedicated thread. It knows
//! nothing about the catalog or the queue: it plays exactly one loaded
//! file at a time and reports progress and termination back to the
//! runtime, which folds them into the playback store.

mod engine;
mod sink;
mod thread;
mod types;

pub use engine::AudioEngine;
pub use types::*;
