//! The playback store: current track, queue, history and play counts.
//!
//! This is the single source of truth consumed by every view. It never
//! touches the audio device; mutations emit [`PlayerEvent`]s and the
//! runtime translates those into engine commands.

mod events;
mod store;

pub use events::*;
pub use store::*;

#[cfg(test)]
mod tests;
