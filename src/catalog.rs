//! Static catalog: the artist's releases and tracks.
//!
//! The discography is embedded at compile time (`data`); the real audio
//! files live under the configured music directory and are probed at
//! startup (`probe`).

mod data;
mod display;
mod model;
mod probe;

pub use data::*;
pub use display::display_from_fields;
pub use model::*;
pub use probe::*;

#[cfg(test)]
mod tests;
