use crate::catalog::Track;

/// Notification emitted by the store after a mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    /// A different track became current; load its file and start playing.
    TrackChanged(Track),
    /// Playback resumed on the already-loaded track.
    Resumed,
    /// Playback paused on the already-loaded track.
    Paused,
}

/// Subscriber callback, invoked synchronously after each mutation that
/// produced an event.
pub type Listener = Box<dyn FnMut(&PlayerEvent) + Send>;
