//! Engine-facing command/event types and shared handles.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Commands accepted by the engine thread.
#[derive(Debug)]
pub enum AudioCmd {
    /// Load the file and start playing it from the beginning.
    Load(PathBuf),
    /// Pause the loaded sink.
    Pause,
    /// Resume the loaded sink.
    Resume,
    /// Quit the engine thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications surfaced by the engine thread.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// Total length of the loaded file, probed at load time.
    Duration(Duration),
    /// The loaded file played to its end.
    TrackEnded,
    /// The file could not be opened or decoded; the engine keeps running.
    LoadFailed(PathBuf),
}

/// Elapsed-time snapshot shared with the runtime.
#[derive(Debug, Clone)]
pub struct Progress {
    /// Elapsed playback time for the loaded file.
    pub elapsed: Duration,
    /// Whether the sink is currently advancing.
    pub playing: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            elapsed: Duration::ZERO,
            playing: false,
        }
    }
}

pub type ProgressHandle = Arc<Mutex<Progress>>;
