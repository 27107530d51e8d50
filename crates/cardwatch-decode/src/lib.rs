//! Wiegand bitstream decoder.
//!
//! This crate contains the only data-transformation logic in the cardwatch
//! workspace: turning a raw bitstring captured from the reader into a
//! structured [`DecodedFrame`] with facility-code and unique-ID fields,
//! plus the fully bit-inverted counterparts of everything.
//!
//! # Design
//!
//! - [`BitString`] is an explicit bit-vector abstraction rather than a
//!   `String` of `'0'`/`'1'` characters, which removes the off-by-one
//!   risk at slice boundaries while keeping the same slicing semantics.
//! - [`DecodedFrame::decode`] is a pure function with no I/O and no hidden
//!   state. The only failure mode is [`MalformedInput`]: a character other
//!   than `'0'`, `'1'`, or the space separator. Short frames are valid,
//!   low-information input from noisy hardware and decode to empty fields.
//!
//! # Examples
//!
//! ```
//! use cardwatch_core::RawMessage;
//! use cardwatch_decode::DecodedFrame;
//!
//! let raw = RawMessage::from("10000000 01111111 11111111 11");
//! let frame = DecodedFrame::decode(&raw).unwrap();
//!
//! assert_eq!(frame.bit_length(), 26);
//! assert_eq!(frame.facility.value(), 0);
//! assert_eq!(frame.id.value(), 65535);
//! assert_eq!(frame.inverted_facility.value(), 255);
//! ```
//!
//! [`MalformedInput`]: cardwatch_core::Error::MalformedInput

pub mod bits;
pub mod frame;

pub use bits::BitString;
pub use frame::{DecodedFrame, decode};
