//! Mock device implementations for testing and development.
//!
//! [`MockWiegand`] simulates the card reader's Wiegand output channel; a
//! paired [`MockWiegandHandle`] swipes cards programmatically. The mock
//! mirrors the real device's "last message" semantics: `poll` reports the
//! newest message seen so far, repeatedly, until a newer one arrives.

use crate::traits::{OperatorInput, WiegandSource};
use cardwatch_core::{Error, RawMessage, Result, SourceInfo};
use std::collections::VecDeque;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Mock Wiegand message source for testing and development.
///
/// # Examples
///
/// ```
/// use cardwatch_device::mock::MockWiegand;
/// use cardwatch_device::traits::WiegandSource;
///
/// #[tokio::main]
/// async fn main() -> cardwatch_core::Result<()> {
///     let (mut source, handle) = MockWiegand::new("RDR-01");
///
///     assert!(source.poll().await?.is_none());
///
///     handle.swipe("10000000011111111111111111").await?;
///     let msg = source.poll().await?.unwrap();
///     assert_eq!(msg.as_str(), "10000000011111111111111111");
///
///     // The latest message sticks until a newer swipe arrives.
///     assert_eq!(source.poll().await?, Some(msg));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockWiegand {
    /// Channel receiver for swipe events
    event_rx: mpsc::Receiver<RawMessage>,

    /// Newest message observed so far
    last: Option<RawMessage>,

    /// Device name
    name: String,
}

impl MockWiegand {
    /// Create a mock source and its controlling handle.
    pub fn new(name: impl Into<String>) -> (Self, MockWiegandHandle) {
        let (event_tx, event_rx) = mpsc::channel(32);
        let name = name.into();

        let source = Self {
            event_rx,
            last: None,
            name: name.clone(),
        };

        let handle = MockWiegandHandle { event_tx, name };

        (source, handle)
    }

    /// Device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl WiegandSource for MockWiegand {
    async fn poll(&mut self) -> Result<Option<RawMessage>> {
        // Drain pending swipes so poll reports the newest message, the
        // way the hardware's last-message register would.
        loop {
            match self.event_rx.try_recv() {
                Ok(msg) => self.last = Some(msg),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.last.is_none() {
                        return Err(Error::channel_closed(format!(
                            "wiegand source {} closed before any message",
                            self.name
                        )));
                    }
                    break;
                }
            }
        }
        Ok(self.last.clone())
    }

    async fn info(&self) -> Result<SourceInfo> {
        Ok(SourceInfo::wiegand(self.name.clone()))
    }
}

/// Handle for driving a [`MockWiegand`] source.
#[derive(Debug, Clone)]
pub struct MockWiegandHandle {
    event_tx: mpsc::Sender<RawMessage>,
    name: String,
}

impl MockWiegandHandle {
    /// Simulate a card swipe reported over the Wiegand channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the source has been dropped.
    pub async fn swipe(&self, raw: impl Into<RawMessage>) -> Result<()> {
        let raw = raw.into();
        self.event_tx.send(raw).await.map_err(|_| {
            Error::channel_closed(format!("wiegand source {} dropped", self.name))
        })
    }

    /// Device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Scripted operator console for tests.
///
/// Replays a fixed sequence of typed lines; reading past the script
/// reports a closed console, which the watch loop treats as fatal EOF.
#[derive(Debug, Default)]
pub struct MockOperator {
    lines: VecDeque<String>,
}

impl MockOperator {
    /// Create a scripted console from typed lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of scripted lines remaining.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl OperatorInput for MockOperator {
    async fn read_line(&mut self, _prompt: &str) -> Result<String> {
        self.lines
            .pop_front()
            .ok_or_else(|| Error::channel_closed("operator console closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_poll_before_any_swipe_is_none() {
        let (mut source, _handle) = MockWiegand::new("RDR-01");
        assert_eq!(source.poll().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_poll_reports_latest_and_sticks() {
        let (mut source, handle) = MockWiegand::new("RDR-01");

        handle.swipe("10").await.unwrap();
        handle.swipe("1100").await.unwrap();

        // Both swipes drained; only the newest is visible.
        assert_eq!(source.poll().await.unwrap(), Some(RawMessage::from("1100")));
        // Unchanged until the next swipe.
        assert_eq!(source.poll().await.unwrap(), Some(RawMessage::from("1100")));

        handle.swipe("01").await.unwrap();
        assert_eq!(source.poll().await.unwrap(), Some(RawMessage::from("01")));
    }

    #[tokio::test]
    async fn test_disconnect_before_first_message_is_an_error() {
        let (mut source, handle) = MockWiegand::new("RDR-01");
        drop(handle);

        let err = source.poll().await.unwrap_err();
        assert!(matches!(err, Error::ChannelClosed { .. }));
    }

    #[tokio::test]
    async fn test_disconnect_after_message_keeps_last() {
        let (mut source, handle) = MockWiegand::new("RDR-01");
        handle.swipe("10").await.unwrap();
        drop(handle);

        assert_eq!(source.poll().await.unwrap(), Some(RawMessage::from("10")));
    }

    #[tokio::test]
    async fn test_source_info() {
        let (source, _handle) = MockWiegand::new("RDR-07");
        let info = source.info().await.unwrap();
        assert_eq!(info.name, "RDR-07");
        assert_eq!(info.serial_mode, "Wiegand");
    }

    #[tokio::test]
    async fn test_mock_operator_script() {
        let mut console = MockOperator::new(["12345678", "0"]);
        assert_eq!(console.remaining(), 2);

        assert_eq!(console.read_line("> ").await.unwrap(), "12345678");
        assert_eq!(console.read_line("> ").await.unwrap(), "0");

        let err = console.read_line("> ").await.unwrap_err();
        assert!(matches!(err, Error::ChannelClosed { .. }));
    }
}
