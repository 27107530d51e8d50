//! The watch loop: prompt, poll, decode on change, render.
//!
//! The loop owns the only persisted state in the observer, the last raw
//! message seen (`Option<RawMessage>`), threaded explicitly through each
//! iteration instead of living in process-wide globals. A malformed frame
//! is rendered as a diagnostic and the loop keeps running; only
//! collaborator failures (console EOF, device gone before first message)
//! terminate it.

use crate::render::{RenderOptions, write_observation};
use cardwatch_core::{RawMessage, Result, constants::DEFAULT_POLL_INTERVAL_MS};
use cardwatch_decode::DecodedFrame;
use cardwatch_device::traits::{OperatorInput, WiegandSource};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, warn};

/// Prompt shown before each blocking comparison read.
const COMPARISON_PROMPT: &str = "Waiting for input and newline:    ";

/// One watch-loop hit: a changed Wiegand message plus the comparison
/// value the operator (or the reader's keyboard channel) typed for it.
#[derive(Debug)]
pub struct Observation {
    /// Comparison value exactly as typed.
    pub keyboard: String,

    /// The raw message that triggered the decode.
    pub raw: RawMessage,

    /// Decode outcome. `Err` carries a malformed-input diagnostic; the
    /// loop survives it and the renderer prints the error instead of a
    /// frame breakdown.
    pub frame: Result<DecodedFrame>,

    /// When the changed message was observed.
    pub observed_at: DateTime<Utc>,
}

/// Polls a Wiegand source and decodes each changed message.
///
/// # Examples
///
/// ```
/// use cardwatch_device::mock::{MockOperator, MockWiegand};
/// use cardwatch_monitor::WatchLoop;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> cardwatch_core::Result<()> {
///     let (source, handle) = MockWiegand::new("RDR-01");
///     handle.swipe("10000000011111111111111111").await?;
///
///     let operator = MockOperator::new(["8388607"]);
///     let mut watch = WatchLoop::new(source, operator).with_poll_delay(Duration::ZERO);
///
///     let observation = watch.step().await?.expect("changed message decodes");
///     assert_eq!(observation.keyboard, "8388607");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct WatchLoop<S, I> {
    source: S,
    input: I,
    last_seen: Option<RawMessage>,
    poll_delay: Duration,
}

impl<S: WiegandSource, I: OperatorInput> WatchLoop<S, I> {
    /// Create a watch loop with the default 1 s post-poll delay.
    pub fn new(source: S, input: I) -> Self {
        Self {
            source,
            input,
            last_seen: None,
            poll_delay: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Override the post-poll delay (tests use zero or paused time).
    #[must_use]
    pub fn with_poll_delay(mut self, poll_delay: Duration) -> Self {
        self.poll_delay = poll_delay;
        self
    }

    /// The last raw message seen, if any.
    #[must_use]
    pub fn last_seen(&self) -> Option<&RawMessage> {
        self.last_seen.as_ref()
    }

    /// Run one loop iteration.
    ///
    /// Blocks on the operator prompt, polls the source, sleeps the
    /// configured delay, and decodes only if the polled message differs
    /// from the last one seen. `last_seen` is updated to the polled value
    /// regardless (an idempotent no-op when identical).
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures only. A malformed message is NOT
    /// an error here; it comes back inside [`Observation::frame`].
    pub async fn step(&mut self) -> Result<Option<Observation>> {
        let keyboard = self.input.read_line(COMPARISON_PROMPT).await?;
        let polled = self.source.poll().await?;
        tokio::time::sleep(self.poll_delay).await;

        let Some(raw) = polled else {
            debug!("no message observed yet");
            return Ok(None);
        };

        let changed = self.last_seen.as_ref() != Some(&raw);
        self.last_seen = Some(raw.clone());
        if !changed {
            debug!("message unchanged, nothing to render");
            return Ok(None);
        }

        let frame = DecodedFrame::decode(&raw);
        if let Err(error) = &frame {
            warn!(%error, raw = %raw, "frame failed to decode");
        }

        Ok(Some(Observation {
            keyboard,
            raw,
            frame,
            observed_at: Utc::now(),
        }))
    }

    /// Run indefinitely, rendering each observation to `out`.
    ///
    /// There is no natural termination; the loop ends only when a
    /// collaborator fails (console EOF, device disappeared) or the
    /// process is interrupted.
    ///
    /// # Errors
    ///
    /// Returns the first fatal collaborator or sink error.
    pub async fn run<W: std::io::Write>(
        &mut self,
        out: &mut W,
        options: &RenderOptions,
    ) -> Result<()> {
        loop {
            if let Some(observation) = self.step().await? {
                write_observation(out, &observation, options)?;
            }
        }
    }
}
