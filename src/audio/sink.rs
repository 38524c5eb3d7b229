//! Utilities for creating `rodio` sinks from media files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

/// Create a paused `Sink` for the file at `path`.
///
/// Open/decode failures bubble up so the engine can report them instead of
/// tearing the thread down.
pub(super) fn create_sink(
    handle: &OutputStream,
    path: &Path,
) -> Result<Sink, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let source = Decoder::new(BufReader::new(file))?;

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
