//! Error types for the cardwatch observer.
//!
//! The taxonomy keeps two distinct failure families apart: decoder-level
//! malformed input, which the watch loop survives and renders as a
//! diagnostic, and session-level failures (hub rejection, missing device),
//! which are fatal at startup. Short or degenerate bitstrings are NOT
//! errors anywhere in this crate family; they decode to empty fields.

use thiserror::Error;

/// Result type alias used across the cardwatch crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while observing and decoding card reads.
#[derive(Debug, Error)]
pub enum Error {
    /// Raw message contains a character other than '0', '1', or the
    /// space separator. Surfaced as a result variant, never a panic.
    #[error("Malformed message: {message}")]
    MalformedInput { message: String },

    /// The hub session rejected the address or credentials. Fatal.
    #[error("Hub connection failed: {message}")]
    ConnectError { message: String },

    /// No matching reader was located at startup. Fatal.
    #[error("Device not found: {message}")]
    DeviceNotFound { message: String },

    /// A device or input channel closed while the loop was running.
    #[error("Channel closed: {message}")]
    ChannelClosed { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new malformed-input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a new connection error.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::ConnectError {
            message: message.into(),
        }
    }

    /// Create a new device-not-found error.
    pub fn device_not_found(message: impl Into<String>) -> Self {
        Self::DeviceNotFound {
            message: message.into(),
        }
    }

    /// Create a new channel-closed error.
    pub fn channel_closed(message: impl Into<String>) -> Self {
        Self::ChannelClosed {
            message: message.into(),
        }
    }

    /// Returns `true` for errors that must terminate the process.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConnectError { .. } | Self::DeviceNotFound { .. } | Self::ChannelClosed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let error = Error::malformed("invalid character '2' at position 1");
        assert!(matches!(error, Error::MalformedInput { .. }));
        assert_eq!(
            error.to_string(),
            "Malformed message: invalid character '2' at position 1"
        );
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_connect_error_display() {
        let error = Error::connect("hub rejected password");
        assert_eq!(error.to_string(), "Hub connection failed: hub rejected password");
        assert!(error.is_fatal());
    }

    #[test]
    fn test_device_not_found_display() {
        let error = Error::device_not_found("no reader registered");
        assert_eq!(error.to_string(), "Device not found: no reader registered");
        assert!(error.is_fatal());
    }

    #[test]
    fn test_channel_closed_is_fatal() {
        assert!(Error::channel_closed("operator input closed").is_fatal());
    }
}
