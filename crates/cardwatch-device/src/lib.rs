//! Device abstraction layer for the cardwatch Wiegand observer.
//!
//! This crate defines the trait seams between the watch loop and its
//! unreliable collaborators: the Wiegand message source, the operator's
//! console, and the credential prompt. It also provides the in-process
//! [`Hub`] that stands in for the vendor device-hub service (registration,
//! password check, device discovery) so the observer can be developed and
//! tested without physical hardware.
//!
//! # Design Philosophy
//!
//! - **Async-first**: all I/O seams are native `async fn` in traits
//!   (Rust 1.90 + Edition 2024 RPITIT).
//! - **Mock-backed**: [`MockWiegand`] is driven programmatically over a
//!   channel; real capture backends belong behind the `hardware-*`
//!   feature flags.
//! - **Error-aware**: session setup, discovery, and channel teardown
//!   surface the fatal [`ConnectError`]/[`DeviceNotFound`]/
//!   [`ChannelClosed`] variants; malformed card data never originates
//!   here and never stops the loop.
//!
//! [`ConnectError`]: cardwatch_core::Error::ConnectError
//! [`DeviceNotFound`]: cardwatch_core::Error::DeviceNotFound
//! [`ChannelClosed`]: cardwatch_core::Error::ChannelClosed

pub mod console;
pub mod credentials;
pub mod hub;
pub mod mock;
pub mod traits;

pub use cardwatch_core::{Error, Result};
pub use console::{ConsoleOperator, StdinLines};
pub use credentials::{CredentialProvider, PromptCredentials, StaticCredentials};
pub use hub::{Hub, HubConfig, HubSession};
pub use mock::{MockOperator, MockWiegand, MockWiegandHandle};
pub use traits::{OperatorInput, WiegandSource};
