use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::thread::spawn_engine_thread;
use super::types::{AudioCmd, AudioEvent, Progress, ProgressHandle};

pub struct AudioEngine {
    tx: Sender<AudioCmd>,
    events: Receiver<AudioEvent>,
    progress: ProgressHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioEngine {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<AudioEvent>();
        let progress: ProgressHandle = Arc::new(Mutex::new(Progress::default()));

        let engine_handle = spawn_engine_thread(rx, event_tx, progress.clone(), audio_settings);

        Self {
            tx,
            events: event_rx,
            progress,
            join: Mutex::new(Some(engine_handle)),
        }
    }

    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Next pending engine notification, if any.
    pub fn poll_event(&self) -> Option<AudioEvent> {
        self.events.try_recv().ok()
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
