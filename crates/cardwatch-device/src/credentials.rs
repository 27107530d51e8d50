//! Credential acquisition for the hub session.
//!
//! The hub password is obtained exactly once at startup. The interactive
//! provider prompts over the shared [`StdinLines`] reader with a bounded
//! timeout and falls back to the default password when the operator does
//! not respond, so an unattended station still comes up. After the
//! prompt, [`PromptCredentials::into_stdin`] hands the reader forward to
//! the watch-loop console; a line typed just after the deadline therefore
//! becomes the first comparison value instead of vanishing into a stale
//! prompt read.

#![allow(async_fn_in_trait)]

use crate::console::StdinLines;
use cardwatch_core::{
    Error, Result,
    constants::{DEFAULT_CREDENTIAL_TIMEOUT_MS, DEFAULT_HUB_PASSWORD},
};
use std::io::Write;
use std::time::Duration;
use tracing::info;

/// Pluggable source of the hub session password.
pub trait CredentialProvider: Send {
    /// Produce the password to register with the hub.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures on the underlying console;
    /// an operator who stays silent gets the default, not an error.
    async fn password(&mut self) -> Result<String>;
}

/// Interactive stdin prompt with timeout and default fallback.
///
/// # Examples
///
/// ```no_run
/// use cardwatch_device::credentials::{CredentialProvider, PromptCredentials};
/// use cardwatch_device::ConsoleOperator;
///
/// # async fn example() -> cardwatch_core::Result<()> {
/// let mut prompt = PromptCredentials::default();
/// let password = prompt.password().await?;
///
/// // Reuse the same stdin reader for the rest of the session.
/// let console = ConsoleOperator::new(prompt.into_stdin());
/// # let _ = (password, console);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PromptCredentials {
    stdin: StdinLines,
    timeout: Duration,
    default: String,
}

impl PromptCredentials {
    /// Create a prompt with a custom timeout and fallback password.
    pub fn new(timeout: Duration, default: impl Into<String>) -> Self {
        Self {
            stdin: StdinLines::new(),
            timeout,
            default: default.into(),
        }
    }

    /// The configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Hand the stdin reader forward once the password has been read.
    ///
    /// The reader task survives the handoff, so input typed after the
    /// prompt's deadline reaches the next consumer.
    #[must_use]
    pub fn into_stdin(self) -> StdinLines {
        self.stdin
    }
}

impl Default for PromptCredentials {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_CREDENTIAL_TIMEOUT_MS),
            DEFAULT_HUB_PASSWORD,
        )
    }
}

impl CredentialProvider for PromptCredentials {
    async fn password(&mut self) -> Result<String> {
        let secs = self.timeout.as_secs();
        print!(
            "Enter password for hub local HTTP interface, or wait {secs}s to use default:    "
        );
        std::io::stdout().flush()?;

        match self.stdin.next_line_before(self.timeout).await {
            Ok(Some(entered)) if entered.is_empty() => {
                info!("empty password entered, using default");
                Ok(self.default.clone())
            }
            Ok(Some(entered)) => Ok(entered),
            Ok(None) => {
                println!();
                info!("credential prompt timed out, using default");
                Ok(self.default.clone())
            }
            Err(Error::ChannelClosed { .. }) => {
                info!("stdin closed, using default");
                Ok(self.default.clone())
            }
            Err(error) => Err(error),
        }
    }
}

/// Fixed password provider for tests and unattended deployments.
#[derive(Debug, Clone)]
pub struct StaticCredentials(String);

impl StaticCredentials {
    /// Wrap a fixed password.
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }
}

impl CredentialProvider for StaticCredentials {
    async fn password(&mut self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn prompt_with_lines() -> (mpsc::Sender<std::io::Result<String>>, PromptCredentials) {
        let (tx, rx) = mpsc::channel(8);
        let prompt = PromptCredentials {
            stdin: StdinLines::from_channel(rx),
            timeout: Duration::from_secs(3),
            default: DEFAULT_HUB_PASSWORD.to_string(),
        };
        (tx, prompt)
    }

    #[tokio::test]
    async fn test_static_credentials() {
        let mut provider = StaticCredentials::new("butterfly");
        assert_eq!(provider.password().await.unwrap(), "butterfly");
    }

    #[test]
    fn test_prompt_defaults_match_constants() {
        let prompt = PromptCredentials::default();
        assert_eq!(prompt.timeout(), Duration::from_millis(3000));
        assert_eq!(prompt.default, "butterfly");
    }

    #[tokio::test]
    async fn test_typed_password_is_used() {
        let (tx, mut prompt) = prompt_with_lines();
        tx.send(Ok("hunter2".to_string())).await.unwrap();

        assert_eq!(prompt.password().await.unwrap(), "hunter2");
    }

    #[tokio::test]
    async fn test_empty_line_falls_back_to_default() {
        let (tx, mut prompt) = prompt_with_lines();
        tx.send(Ok(String::new())).await.unwrap();

        assert_eq!(prompt.password().await.unwrap(), "butterfly");
    }

    #[tokio::test]
    async fn test_stdin_eof_falls_back_to_default() {
        let (tx, mut prompt) = prompt_with_lines();
        drop(tx);

        assert_eq!(prompt.password().await.unwrap(), "butterfly");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_keeps_the_next_line_for_the_console() {
        let (tx, mut prompt) = prompt_with_lines();

        // Silent operator: prompt times out onto the default.
        assert_eq!(prompt.password().await.unwrap(), "butterfly");

        // The first line typed after the deadline must reach the next
        // stdin consumer, not a leftover prompt read.
        tx.send(Ok("8388607".to_string())).await.unwrap();
        let mut stdin = prompt.into_stdin();
        assert_eq!(stdin.next_line().await.unwrap(), "8388607");
    }
}
