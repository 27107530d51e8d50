//! Constants for the cardwatch Wiegand observer.
//!
//! # Wiegand-26 frame geometry
//!
//! The canonical 26-bit frame carries two parity bits around a 24-bit
//! payload:
//!
//! ```text
//! P AAAAAAAA BBBBBBBBBBBBBBBB P
//! ^ ^^^^^^^^ ^^^^^^^^^^^^^^^^ ^
//! │ facility unique card ID   └ trailing parity
//! └ leading parity
//! ```
//!
//! The decoder does not assume a fixed frame length; these constants
//! describe the canonical layout used for field extraction and for the
//! annotated renderer breakdown.

// ============================================================================
// Wiegand frame geometry
// ============================================================================

/// Canonical Wiegand-26 frame length in bits.
///
/// The renderer only draws the annotated `P AAAAAAAA ... P` breakdown when
/// at least this many bits were captured.
pub const WIEGAND26_BIT_LENGTH: usize = 26;

/// Number of parity/guard bits stripped from a frame (one at each end).
pub const PARITY_OVERHEAD: usize = 2;

/// Width of the facility-code field within the parity-stripped payload.
pub const FACILITY_BITS: usize = 8;

/// Bits per group when reinterpreting a field as Latin-1 text.
pub const BITS_PER_TEXT_GROUP: usize = 8;

/// Width bound for decimal conversion of a bitstring.
///
/// Values are accumulated into a `u128` with saturating arithmetic; inputs
/// longer than this render a saturated decimal value. The canonical 26-bit
/// frame is nowhere near the bound.
pub const MAX_VALUE_BITS: usize = 128;

// ============================================================================
// Serial capture mode
// ============================================================================

/// Serial mode the reader must be configured with.
pub const SERIAL_MODE: &str = "Wiegand";

/// Wire protocol variant the reader must be configured with.
pub const SERIAL_PROTOCOL: &str = "Wiegand-ASCII";

// ============================================================================
// Hub session defaults
// ============================================================================

/// Default hub host (local VirtualHub-style service).
pub const DEFAULT_HUB_HOST: &str = "127.0.0.1";

/// Default hub HTTP port.
pub const DEFAULT_HUB_PORT: u16 = 4444;

/// Default hub user.
pub const DEFAULT_HUB_USER: &str = "admin";

/// Password used when the operator lets the startup prompt time out.
pub const DEFAULT_HUB_PASSWORD: &str = "butterfly";

// ============================================================================
// Timing
// ============================================================================

/// How long the startup credential prompt waits before falling back to
/// [`DEFAULT_HUB_PASSWORD`].
///
/// # Value: 3000ms (3 seconds)
pub const DEFAULT_CREDENTIAL_TIMEOUT_MS: u64 = 3000;

/// Delay imposed after each device poll to avoid busy-polling.
///
/// # Value: 1000ms (1 second)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
