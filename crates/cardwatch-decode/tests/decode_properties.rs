//! Property-based tests for the Wiegand frame decoder.
//!
//! These tests use proptest to generate random bitstrings and verify that
//! the decode invariants hold for all lengths, not just the canonical
//! 26-bit frame.

use cardwatch_core::RawMessage;
use cardwatch_decode::{BitString, DecodedFrame};
use proptest::prelude::*;

/// Strategy for raw bitstrings without separators (0..=96 bits).
fn bitstring() -> impl Strategy<Value = String> {
    prop::string::string_regex("[01]{0,96}").expect("Failed to create bitstring regex strategy")
}

/// Strategy for raw device strings with interleaved space separators.
fn spaced_bitstring() -> impl Strategy<Value = String> {
    prop::string::string_regex("[01 ]{0,96}").expect("Failed to create spaced regex strategy")
}

proptest! {
    /// Property: inversion is a length-preserving involution.
    #[test]
    fn prop_inversion_involution(raw in bitstring()) {
        let frame = DecodedFrame::decode(&RawMessage::from(raw.as_str())).unwrap();

        prop_assert_eq!(frame.inverted.len(), frame.raw.len());
        prop_assert_eq!(frame.inverted.inverted(), frame.raw.clone());

        // per-position complement
        for (a, b) in frame.raw.bits().iter().zip(frame.inverted.bits()) {
            prop_assert_eq!(*a, !*b);
        }
    }

    /// Property: the payload is always the raw length minus the two
    /// parity bits, floored at zero.
    #[test]
    fn prop_payload_length(raw in bitstring()) {
        let frame = DecodedFrame::decode(&RawMessage::from(raw.as_str())).unwrap();
        prop_assert_eq!(frame.payload.len(), frame.raw.len().saturating_sub(2));
    }

    /// Property: when the payload carries fields, the facility field is
    /// exactly 8 bits and facility + ID reconstructs the payload.
    #[test]
    fn prop_fields_partition_payload(raw in bitstring()) {
        let frame = DecodedFrame::decode(&RawMessage::from(raw.as_str())).unwrap();

        if frame.payload.len() >= 8 {
            prop_assert_eq!(frame.facility.len(), 8);
            prop_assert_eq!(frame.id.len(), frame.payload.len() - 8);

            let rebuilt: BitString = frame
                .facility
                .bits()
                .iter()
                .chain(frame.id.bits())
                .copied()
                .collect();
            prop_assert_eq!(rebuilt, frame.payload.clone());
        } else {
            prop_assert!(frame.facility.is_empty());
            prop_assert!(frame.id.is_empty());
        }
    }

    /// Property: parsing the hex rendering back as base-16 equals the
    /// decimal value, for every populated field representation.
    #[test]
    fn prop_hex_roundtrips_to_value(raw in bitstring()) {
        let frame = DecodedFrame::decode(&RawMessage::from(raw.as_str())).unwrap();

        for field in [&frame.raw, &frame.payload, &frame.facility, &frame.id] {
            if field.is_empty() {
                prop_assert_eq!(field.hex(), "");
                continue;
            }
            let parsed = u128::from_str_radix(&field.hex(), 16).unwrap();
            prop_assert_eq!(parsed, field.value());
            // padded to ceil(len/4) digits
            prop_assert_eq!(field.hex().len(), field.len().div_ceil(4));
        }
    }

    /// Property: separators never change the decode result.
    #[test]
    fn prop_separators_are_transparent(raw in spaced_bitstring()) {
        let spaced = DecodedFrame::decode(&RawMessage::from(raw.as_str())).unwrap();
        let dense: String = raw.chars().filter(|c| *c != ' ').collect();
        let stripped = DecodedFrame::decode(&RawMessage::from(dense.as_str())).unwrap();
        prop_assert_eq!(spaced, stripped);
    }

    /// Property: all-zero strings have value 0 and all-one strings have
    /// value 2^n - 1 (within the bounded conversion width).
    #[test]
    fn prop_extremal_values(n in 0usize..96) {
        let zeros = BitString::parse(&"0".repeat(n)).unwrap();
        prop_assert_eq!(zeros.value(), 0);

        let ones = BitString::parse(&"1".repeat(n)).unwrap();
        let expected = if n == 0 { 0 } else { (1u128 << n) - 1 };
        prop_assert_eq!(ones.value(), expected);
    }
}
