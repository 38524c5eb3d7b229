use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use lofty::prelude::*;
use rodio::{OutputStreamBuilder, Sink};

use crate::config::AudioSettings;

use super::sink::create_sink;
use super::types::{AudioCmd, AudioEvent, ProgressHandle};

pub(super) fn spawn_engine_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    progress: ProgressHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut paused = true;
        // Set per load so a drained sink reports TrackEnded exactly once.
        let mut ended_reported = false;

        // Spawn a ticker thread to update progress.elapsed periodically.
        let progress_for_ticker = progress.clone();
        thread::spawn(move || loop {
            thread::sleep(Duration::from_millis(500));
            let mut p = progress_for_ticker.lock().unwrap();
            if p.playing {
                p.elapsed = p.elapsed + Duration::from_millis(500);
            }
        });

        fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            sink.set_volume(1.0);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(1.0 - t);
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load(path) => {
                        // Probe the real length up front; rodio sources don't
                        // reliably report it for common formats.
                        if let Ok(tagged) = lofty::read_from_path(&path) {
                            let _ = events.send(AudioEvent::Duration(
                                tagged.properties().duration(),
                            ));
                        }

                        let new_sink = match create_sink(&stream, &path) {
                            Ok(s) => s,
                            Err(_) => {
                                // Keep the thread alive; the runtime decides
                                // what (if anything) to do about it.
                                if let Some(s) = sink.take() {
                                    s.stop();
                                }
                                paused = true;
                                if let Ok(mut p) = progress.lock() {
                                    p.elapsed = Duration::ZERO;
                                    p.playing = false;
                                }
                                let _ = events.send(AudioEvent::LoadFailed(path));
                                continue;
                            }
                        };

                        let crossfade_ms = audio_settings.crossfade_ms;
                        let crossfade_steps = audio_settings.crossfade_steps.max(1);
                        new_sink.set_volume(1.0);

                        // Crossfade if something is audible; otherwise hard swap.
                        if let Some(old_sink) = sink.as_ref() {
                            if !paused && crossfade_ms > 0 {
                                old_sink.set_volume(1.0);
                                new_sink.set_volume(0.0);
                                new_sink.play();

                                // Fade volumes in a short blocking loop. This is simple and good enough
                                // for a TUI player; audio continues in rodio's mixer thread.
                                for step in 1..=crossfade_steps {
                                    let t = (step as f32) / (crossfade_steps as f32);
                                    old_sink.set_volume(1.0 - t);
                                    new_sink.set_volume(t);
                                    thread::sleep(Duration::from_millis(
                                        (crossfade_ms / crossfade_steps).max(1),
                                    ));
                                }

                                old_sink.stop();
                                new_sink.set_volume(1.0);
                            } else {
                                old_sink.stop();
                            }
                        }

                        new_sink.play();
                        sink = Some(new_sink);
                        paused = false;
                        ended_reported = false;
                        if let Ok(mut p) = progress.lock() {
                            p.elapsed = Duration::ZERO;
                            p.playing = true;
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(ref s) = sink {
                            s.pause();
                            paused = true;
                            if let Ok(mut p) = progress.lock() {
                                p.playing = false;
                            }
                        }
                    }

                    AudioCmd::Resume => {
                        if let Some(ref s) = sink {
                            s.play();
                            paused = false;
                            if let Ok(mut p) = progress.lock() {
                                p.playing = true;
                            }
                        }
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = sink {
                            // Fade out gently before stopping.
                            fade_out_sink(s, fade_out_ms);
                            s.stop();
                        }
                        if let Ok(mut p) = progress.lock() {
                            p.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic check for end-of-track.
                    if let Some(ref s) = sink {
                        if !paused && s.empty() && !ended_reported {
                            ended_reported = true;
                            if let Ok(mut p) = progress.lock() {
                                p.playing = false;
                            }
                            let _ = events.send(AudioEvent::TrackEnded);
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
