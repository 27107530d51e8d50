//! Decoded Wiegand frame derivation.
//!
//! [`DecodedFrame::decode`] is the single source of truth for the decode
//! transform. Every representation the observer can print is derived here
//! once; presentation differences (verbose debug blocks, JSON) live in
//! the renderer, never in a second decode path.

use crate::bits::BitString;
use cardwatch_core::{
    RawMessage, Result,
    constants::{FACILITY_BITS, PARITY_OVERHEAD, WIEGAND26_BIT_LENGTH},
};

/// Structured result of decoding one raw Wiegand message.
///
/// An immutable value recomputed fresh on every new message; it owns all
/// of its bit strings and has no shared state with the decoder.
///
/// Field population degrades by captured length instead of erroring:
///
/// | captured bits | populated |
/// |---------------|-----------|
/// | 0 or 1        | `raw`, `inverted` only |
/// | 2..=9         | plus `payload`, `inverted_payload` |
/// | 10 and up     | plus facility/ID fields |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Separator-stripped bits exactly as received, MSB first.
    pub raw: BitString,

    /// Every bit of `raw` flipped, same length.
    pub inverted: BitString,

    /// `raw` with the leading and trailing parity/guard bits removed.
    /// Empty when fewer than 2 bits were captured.
    pub payload: BitString,

    /// Parity-stripped view of `inverted`.
    pub inverted_payload: BitString,

    /// First 8 bits of the payload. Empty when the payload is shorter
    /// than 8 bits.
    pub facility: BitString,

    /// Payload bits after the facility field.
    pub id: BitString,

    /// Facility field of the inverted payload.
    pub inverted_facility: BitString,

    /// ID field of the inverted payload.
    pub inverted_id: BitString,
}

impl DecodedFrame {
    /// Decode a raw device message.
    ///
    /// Pure function: strips separators, validates the bit alphabet, and
    /// derives every representation of the frame. Short frames are valid
    /// input from noisy hardware and produce a degraded result with empty
    /// derived fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the message contains a
    /// character other than `'0'`, `'1'`, or the space separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardwatch_core::RawMessage;
    /// use cardwatch_decode::DecodedFrame;
    ///
    /// // Canonical 26-bit frame: facility byte zero, ID all ones.
    /// let raw = RawMessage::from("10000000011111111111111111");
    /// let frame = DecodedFrame::decode(&raw).unwrap();
    ///
    /// assert_eq!(frame.payload.len(), 24);
    /// assert_eq!(frame.facility.decimal(), "0");
    /// assert_eq!(frame.id.decimal(), "65535");
    ///
    /// // A two-bit noise burst decodes without fields, not an error.
    /// let noise = DecodedFrame::decode(&RawMessage::from("10")).unwrap();
    /// assert!(noise.facility.is_empty());
    /// ```
    ///
    /// [`Error::MalformedInput`]: cardwatch_core::Error::MalformedInput
    pub fn decode(raw: &RawMessage) -> Result<Self> {
        let bits = BitString::parse(raw.as_str())?;
        let inverted = bits.inverted();

        let payload = strip_parity(&bits);
        let inverted_payload = strip_parity(&inverted);

        let (facility, id) = split_fields(&payload);
        let (inverted_facility, inverted_id) = split_fields(&inverted_payload);

        Ok(DecodedFrame {
            raw: bits,
            inverted,
            payload,
            inverted_payload,
            facility,
            id,
            inverted_facility,
            inverted_id,
        })
    }

    /// Number of bits captured from the wire.
    #[must_use]
    pub fn bit_length(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the payload was long enough to carry the
    /// facility-code and unique-ID fields.
    #[must_use]
    pub fn has_fields(&self) -> bool {
        !self.facility.is_empty()
    }

    /// Returns `true` if enough bits were captured for the annotated
    /// Wiegand-26 breakdown (parity, facility byte, 16-bit ID, parity).
    #[must_use]
    pub fn has_wiegand26_layout(&self) -> bool {
        self.raw.len() >= WIEGAND26_BIT_LENGTH
    }
}

/// Decode a raw device message into a [`DecodedFrame`].
///
/// Free-function form of [`DecodedFrame::decode`].
pub fn decode(raw: &RawMessage) -> Result<DecodedFrame> {
    DecodedFrame::decode(raw)
}

/// Drop the leading and trailing parity/guard bits.
///
/// Frames shorter than the parity overhead have no payload.
fn strip_parity(bits: &BitString) -> BitString {
    if bits.len() < PARITY_OVERHEAD {
        return BitString::default();
    }
    bits.slice(1..bits.len() - 1)
}

/// Split a payload into its facility-code and unique-ID fields.
///
/// Payloads shorter than the facility width yield two empty fields;
/// a short payload is low-information input, not an error.
fn split_fields(payload: &BitString) -> (BitString, BitString) {
    if payload.len() < FACILITY_BITS {
        return (BitString::default(), BitString::default());
    }
    (
        payload.slice(0..FACILITY_BITS),
        payload.slice(FACILITY_BITS..payload.len()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardwatch_core::Error;
    use rstest::rstest;

    fn frame(raw: &str) -> DecodedFrame {
        DecodedFrame::decode(&RawMessage::from(raw)).unwrap()
    }

    #[test]
    fn test_canonical_wiegand26_frame() {
        // 1 + 00000000 + 1111111111111111 + 1
        let f = frame("10000000011111111111111111");

        assert_eq!(f.bit_length(), 26);
        assert!(f.has_fields());
        assert!(f.has_wiegand26_layout());

        assert_eq!(f.facility.value(), 0);
        assert_eq!(f.id.value(), 65535);
        assert_eq!(f.inverted_facility.value(), 255);
        assert_eq!(f.inverted_id.value(), 0);

        assert_eq!(f.facility.hex(), "00");
        assert_eq!(f.id.hex(), "FFFF");
    }

    #[test]
    fn test_separators_do_not_change_decode() {
        let spaced = frame("10000000 01111111 11111111 11");
        let dense = frame("10000000011111111111111111");
        assert_eq!(spaced, dense);
    }

    #[rstest]
    #[case("", 0)]
    #[case("0", 1)]
    #[case("1", 1)]
    fn test_degenerate_input_is_not_an_error(#[case] input: &str, #[case] len: usize) {
        let f = frame(input);
        assert_eq!(f.bit_length(), len);
        assert!(f.payload.is_empty());
        assert!(f.facility.is_empty());
        assert!(f.id.is_empty());
        assert!(f.inverted_facility.is_empty());
        // representations stay total
        assert_eq!(f.payload.decimal(), "0");
        assert_eq!(f.payload.hex(), "");
        assert_eq!(f.payload.text(), "");
    }

    #[rstest]
    #[case("10", 0)]
    #[case("101", 1)]
    #[case("101010101", 7)] // payload of 7 bits: still below the field threshold
    fn test_short_payload_has_no_fields(#[case] input: &str, #[case] payload_len: usize) {
        let f = frame(input);
        assert_eq!(f.payload.len(), payload_len);
        assert!(!f.has_fields());
        assert!(f.id.is_empty());
    }

    #[test]
    fn test_ten_bits_is_the_field_threshold() {
        // 10-bit frame: 8-bit payload, facility populated, empty ID
        let f = frame("1010101010");
        assert_eq!(f.payload.len(), 8);
        assert!(f.has_fields());
        assert_eq!(f.facility.len(), 8);
        assert!(f.id.is_empty());
        assert_eq!(f.id.decimal(), "0");
    }

    #[test]
    fn test_inverted_fields_complement_fields() {
        let f = frame("10110011101100111011001110");
        assert_eq!(f.inverted, f.raw.inverted());
        assert_eq!(f.inverted_payload, f.payload.inverted());
        assert_eq!(f.inverted_facility, f.facility.inverted());
        assert_eq!(f.inverted_id, f.id.inverted());
    }

    #[test]
    fn test_fields_reconstruct_payload() {
        let f = frame("10110011101100111011001110");
        let rebuilt: BitString = f
            .facility
            .bits()
            .iter()
            .chain(f.id.bits())
            .copied()
            .collect();
        assert_eq!(rebuilt, f.payload);
    }

    #[test]
    fn test_malformed_input_is_reported_not_raised() {
        let err = DecodedFrame::decode(&RawMessage::from("102")).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn test_longer_than_canonical_frames_decode() {
        // 37-bit reads occur on some readers; raw-level fields must not
        // assume the 26-bit layout.
        let bits = "1".repeat(37);
        let f = frame(&bits);
        assert_eq!(f.bit_length(), 37);
        assert_eq!(f.payload.len(), 35);
        assert_eq!(f.facility.len(), 8);
        assert_eq!(f.id.len(), 27);
        assert!(f.has_wiegand26_layout());
    }
}
