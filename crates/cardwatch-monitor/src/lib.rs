//! Watch loop and result rendering for the cardwatch observer.
//!
//! This crate connects the device seams to the decoder: the
//! [`WatchLoop`] polls a Wiegand source once per operator prompt, decodes
//! on change, and hands each [`Observation`] to the renderer, which
//! prints the normal and bit-inverted interpretations side by side with
//! the keyboard-reported comparison value.

pub mod render;
pub mod watch;

pub use render::{DecodeReport, OutputFormat, RenderOptions, write_observation};
pub use watch::{Observation, WatchLoop};
