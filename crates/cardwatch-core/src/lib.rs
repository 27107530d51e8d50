//! Core types shared by the cardwatch Wiegand observer.
//!
//! This crate holds the error taxonomy, the [`RawMessage`] type carried
//! between the device layer and the decoder, and the protocol constants
//! (Wiegand-26 geometry, hub defaults, timing).

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
