//! Bit-vector abstraction for captured Wiegand frames.
//!
//! A [`BitString`] is an ordered sequence of bits, most-significant
//! (first-received) bit first. All representations are total functions: an
//! empty bit string renders as an empty/zero result instead of failing, so
//! degenerate frames from noisy hardware never crash the observer.

use cardwatch_core::{Error, Result, constants::BITS_PER_TEXT_GROUP};
use std::fmt;
use std::str::FromStr;

/// Hex digit lookup for nibble rendering.
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Ordered bit sequence captured from the reader, MSB first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitString(Vec<bool>);

impl BitString {
    /// Parse a raw device string into a bit string.
    ///
    /// Space characters are formatting separators from the source device
    /// and are stripped. Every remaining character must be `'0'` or `'1'`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if any non-separator character is
    /// not a binary digit. The reported position is the offset in the raw
    /// string, separators included, so it can be located in a device log.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardwatch_decode::BitString;
    ///
    /// let bits = BitString::parse("10 01").unwrap();
    /// assert_eq!(bits.len(), 4);
    /// assert_eq!(bits.to_string(), "1001");
    ///
    /// assert!(BitString::parse("102").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let mut bits = Vec::with_capacity(raw.len());
        for (i, c) in raw.chars().enumerate() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                ' ' => {}
                other => {
                    return Err(Error::malformed(format!(
                        "invalid character {other:?} at position {i}"
                    )));
                }
            }
        }
        Ok(BitString(bits))
    }

    /// Number of bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no bits were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The bits as a slice, MSB first.
    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Bitwise complement, preserving length and position.
    #[must_use]
    pub fn inverted(&self) -> BitString {
        BitString(self.0.iter().map(|&bit| !bit).collect())
    }

    /// Copy of the bits in `range`, clamped to the available length.
    ///
    /// Clamping keeps field extraction total for short frames: slicing
    /// past the end yields an empty bit string, never a panic.
    #[must_use]
    pub fn slice(&self, range: std::ops::Range<usize>) -> BitString {
        let start = range.start.min(self.0.len());
        let end = range.end.min(self.0.len()).max(start);
        BitString(self.0[start..end].to_vec())
    }

    /// Big-endian unsigned value of the bits.
    ///
    /// Accumulated into a `u128` with saturating arithmetic; frames longer
    /// than [`MAX_VALUE_BITS`] saturate instead of wrapping. An empty bit
    /// string has value 0.
    ///
    /// [`MAX_VALUE_BITS`]: cardwatch_core::constants::MAX_VALUE_BITS
    #[must_use]
    pub fn value(&self) -> u128 {
        self.0.iter().fold(0u128, |acc, &bit| {
            acc.saturating_mul(2).saturating_add(bit as u128)
        })
    }

    /// Decimal rendering of [`value`](Self::value).
    #[must_use]
    pub fn decimal(&self) -> String {
        self.value().to_string()
    }

    /// Uppercase hexadecimal rendering, zero-padded to `ceil(len / 4)`
    /// digits. An empty bit string renders as an empty string.
    ///
    /// Nibbles are grouped from the least-significant end, so a leading
    /// partial nibble is zero-extended on the left. This matches padding
    /// the integer value to the fixed digit width.
    #[must_use]
    pub fn hex(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let width = self.0.len().div_ceil(4);
        let mut nibbles = vec![0u8; width];
        for (i, &bit) in self.0.iter().rev().enumerate() {
            if bit {
                nibbles[width - 1 - i / 4] |= 1 << (i % 4);
            }
        }
        nibbles
            .into_iter()
            .map(|n| HEX_DIGITS[n as usize] as char)
            .collect()
    }

    /// Best-effort Latin-1 text rendering.
    ///
    /// Bits are grouped into consecutive 8-bit chunks from the left and
    /// each chunk is decoded as one code point. A trailing partial chunk
    /// is decoded from the bits present, zero-extended conceptually to 8
    /// bits by the binary-to-integer conversion; for misaligned lengths
    /// the output is a debugging aid, not a meaningful decoding.
    #[must_use]
    pub fn text(&self) -> String {
        self.0
            .chunks(BITS_PER_TEXT_GROUP)
            .map(|group| {
                let value = group.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8);
                char::from(value)
            })
            .collect()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BitString::parse(s)
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        BitString(iter.into_iter().collect())
    }
}
