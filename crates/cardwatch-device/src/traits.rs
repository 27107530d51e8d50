//! Trait seams between the watch loop and its collaborators.
//!
//! These traits use native `async fn` methods (Edition 2024 RPITIT), so
//! they are not object-safe; callers take them as generic parameters:
//!
//! ```no_run
//! use cardwatch_device::traits::WiegandSource;
//! use cardwatch_core::{RawMessage, Result};
//!
//! async fn latest<S: WiegandSource>(source: &mut S) -> Result<Option<RawMessage>> {
//!     source.poll().await
//! }
//! ```

#![allow(async_fn_in_trait)]

use cardwatch_core::{RawMessage, Result, SourceInfo};

/// A source of raw Wiegand messages.
///
/// Implementations report the most recent message the hardware observed.
/// Change detection is the watch loop's job: `poll` may return the same
/// message on consecutive calls, and the loop deduplicates against its
/// own `last_seen` state.
pub trait WiegandSource: Send + Sync {
    /// The latest raw message observed, or `None` if the device has not
    /// reported anything yet.
    ///
    /// Non-blocking with respect to card reads: a call between swipes
    /// returns the previous message rather than waiting for a new one.
    ///
    /// # Errors
    ///
    /// Returns an error if the device has disappeared or the underlying
    /// channel closed before any message arrived.
    async fn poll(&mut self) -> Result<Option<RawMessage>>;

    /// Metadata about the source (name, serial mode, protocol).
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be queried.
    async fn info(&self) -> Result<SourceInfo>;
}

/// The operator's interactive console.
///
/// One blocking line read per loop iteration yields the card number the
/// reader typed over its USB keyboard channel (or whatever comparison
/// value the operator enters by hand). Deliberately untimed, unlike the
/// one-shot credential prompt at startup.
pub trait OperatorInput: Send + Sync {
    /// Display `prompt` and block until the operator submits a line.
    ///
    /// The returned string has the trailing newline removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the console closed (EOF); the watch loop
    /// treats that as fatal and shuts down.
    async fn read_line(&mut self, prompt: &str) -> Result<String>;
}
