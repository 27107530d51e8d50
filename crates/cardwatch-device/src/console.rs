//! Interactive console input.
//!
//! Every stdin consumer goes through one long-lived blocking reader task
//! via [`StdinLines`]. A single reader means a timed-out prompt cannot
//! leave a parked read holding the stdin lock: a line typed after the
//! deadline stays queued in the channel and reaches the next caller
//! instead of being swallowed by an orphaned read.

use crate::traits::OperatorInput;
use cardwatch_core::{Error, Result};
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

/// Capacity of the reader-to-consumer line channel.
const LINE_BUFFER: usize = 8;

/// Lines from the process's stdin, read by a single background task.
///
/// The reader task is spawned on the first read and runs until stdin
/// reaches EOF or the handle is dropped. Consumers hand the value off
/// (see [`PromptCredentials::into_stdin`]) rather than constructing a
/// second `StdinLines`; the process must never run two stdin readers at
/// once.
///
/// [`PromptCredentials::into_stdin`]: crate::credentials::PromptCredentials::into_stdin
#[derive(Debug, Default)]
pub struct StdinLines {
    line_rx: Option<mpsc::Receiver<std::io::Result<String>>>,
}

impl StdinLines {
    /// Create a handle; the reader task starts on the first read.
    #[must_use]
    pub fn new() -> Self {
        Self { line_rx: None }
    }

    /// Wrap an existing line channel instead of reading real stdin.
    pub(crate) fn from_channel(line_rx: mpsc::Receiver<std::io::Result<String>>) -> Self {
        Self {
            line_rx: Some(line_rx),
        }
    }

    fn receiver(&mut self) -> &mut mpsc::Receiver<std::io::Result<String>> {
        self.line_rx.get_or_insert_with(|| {
            let (line_tx, line_rx) = mpsc::channel(LINE_BUFFER);
            tokio::task::spawn_blocking(move || {
                loop {
                    let mut line = String::new();
                    match std::io::stdin().read_line(&mut line) {
                        Ok(0) => break,
                        Ok(_) => {
                            let line = line.trim_end_matches(['\r', '\n']).to_string();
                            if line_tx.blocking_send(Ok(line)).is_err() {
                                break;
                            }
                        }
                        Err(error) => {
                            let _ = line_tx.blocking_send(Err(error));
                            break;
                        }
                    }
                }
            });
            line_rx
        })
    }

    /// Wait for the next line, trailing newline removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelClosed`] once stdin reaches EOF, or the
    /// underlying I/O error if a read failed.
    pub async fn next_line(&mut self) -> Result<String> {
        match self.receiver().recv().await {
            Some(Ok(line)) => Ok(line),
            Some(Err(error)) => Err(error.into()),
            None => Err(Error::channel_closed("stdin closed")),
        }
    }

    /// Wait for the next line, giving up after `limit`.
    ///
    /// Returns `Ok(None)` when the deadline passes first. The reader task
    /// keeps running, so a line typed after the deadline is delivered to
    /// the next caller, never discarded.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`next_line`](Self::next_line).
    pub async fn next_line_before(&mut self, limit: Duration) -> Result<Option<String>> {
        match tokio::time::timeout(limit, self.receiver().recv()).await {
            Err(_) => Ok(None),
            Ok(Some(Ok(line))) => Ok(Some(line)),
            Ok(Some(Err(error))) => Err(error.into()),
            Ok(None) => Err(Error::channel_closed("stdin closed")),
        }
    }
}

/// Stdin-backed operator console.
#[derive(Debug, Default)]
pub struct ConsoleOperator {
    stdin: StdinLines,
}

impl ConsoleOperator {
    /// Create a console over an existing stdin reader.
    ///
    /// Pass the reader forward from the startup credential prompt (via
    /// [`PromptCredentials::into_stdin`]) so a comparison line typed
    /// early is not lost to a stale prompt read.
    ///
    /// [`PromptCredentials::into_stdin`]: crate::credentials::PromptCredentials::into_stdin
    #[must_use]
    pub fn new(stdin: StdinLines) -> Self {
        Self { stdin }
    }
}

impl OperatorInput for ConsoleOperator {
    async fn read_line(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        self.stdin.next_line().await
    }
}
