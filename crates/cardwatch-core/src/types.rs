use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw message as surfaced by the reader hardware.
///
/// The device reports each Wiegand frame as ASCII `'0'`/`'1'` characters,
/// optionally interleaved with spaces used purely as formatting
/// separators. The type is deliberately unvalidated: validation happens in
/// the decoder so that a noisy frame is reported as a `MalformedInput`
/// result rather than being dropped at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawMessage(String);

impl RawMessage {
    /// Wrap a raw device string.
    pub fn new(raw: impl Into<String>) -> Self {
        RawMessage(raw.into())
    }

    /// Get the message exactly as the device reported it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the device reported an empty message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RawMessage {
    fn from(raw: &str) -> Self {
        RawMessage::new(raw)
    }
}

impl From<String> for RawMessage {
    fn from(raw: String) -> Self {
        RawMessage(raw)
    }
}

/// Metadata describing a Wiegand message source.
///
/// Supported readers are configured with serial mode "Wiegand" and
/// protocol "Wiegand-ASCII"; the values are echoed at startup so an
/// operator can confirm the reader is in the expected mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Device name as registered with the hub.
    pub name: String,

    /// Serial capture mode.
    pub serial_mode: String,

    /// Wire protocol variant.
    pub protocol: String,
}

impl SourceInfo {
    /// Create source metadata with the standard Wiegand mode strings.
    pub fn wiegand(name: impl Into<String>) -> Self {
        SourceInfo {
            name: name.into(),
            serial_mode: crate::constants::SERIAL_MODE.to_string(),
            protocol: crate::constants::SERIAL_PROTOCOL.to_string(),
        }
    }
}

impl fmt::Display for SourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (mode={}, protocol={})",
            self.name, self.serial_mode, self.protocol
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1000000001111111111111111", false)]
    #[case("10000000 01111111 11111111", false)]
    #[case("", true)]
    fn test_raw_message_roundtrip(#[case] input: &str, #[case] empty: bool) {
        let msg = RawMessage::from(input);
        assert_eq!(msg.as_str(), input);
        assert_eq!(msg.to_string(), input);
        assert_eq!(msg.is_empty(), empty);
    }

    #[test]
    fn test_raw_message_equality_includes_separators() {
        // Change detection in the watch loop compares the raw device
        // string; separator layout is part of the identity.
        assert_ne!(RawMessage::from("01 01"), RawMessage::from("0101"));
    }

    #[test]
    fn test_source_info_wiegand_defaults() {
        let info = SourceInfo::wiegand("RDR-01");
        assert_eq!(info.serial_mode, "Wiegand");
        assert_eq!(info.protocol, "Wiegand-ASCII");
        assert_eq!(info.to_string(), "RDR-01 (mode=Wiegand, protocol=Wiegand-ASCII)");
    }
}
