//! cardwatch: observe a card reader's Wiegand output next to its USB
//! keyboard channel.
//!
//! Startup follows the hardware session lifecycle: prompt for the hub
//! password (bounded timeout, default fallback), open the hub session,
//! locate the target reader, then run the watch loop until interrupted.
//! A rejected password or a missing reader terminates the process with a
//! non-zero exit and a diagnostic.
//!
//! No real capture backend is compiled in yet (the device crate keeps
//! `hardware-*` feature placeholders); the binary registers a simulated
//! reader that replays sample Wiegand-26 frames so the whole pipeline can
//! be exercised end to end.

use anyhow::Context;
use cardwatch_core::constants::{
    DEFAULT_CREDENTIAL_TIMEOUT_MS, DEFAULT_HUB_HOST, DEFAULT_HUB_PASSWORD, DEFAULT_HUB_PORT,
    DEFAULT_HUB_USER, DEFAULT_POLL_INTERVAL_MS,
};
use cardwatch_device::{
    ConsoleOperator, CredentialProvider, Hub, HubConfig, MockWiegand, PromptCredentials,
    traits::WiegandSource,
};
use cardwatch_monitor::{OutputFormat, RenderOptions, WatchLoop};
use clap::Parser;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Name the simulated reader registers under.
const SIMULATED_READER: &str = "WIEGANDRDR-1";

/// Frames the simulated reader replays, in order.
const SAMPLE_FRAMES: [&str; 4] = [
    // facility 0, ID 65535
    "10000000011111111111111111",
    // facility 123, ID 45678
    "00111101110110010011011101",
    // facility 1, ID 2330
    "10000000100001001000110100",
    // short noise burst, decodes with empty fields
    "101",
];

/// Seconds between simulated swipes.
const SIMULATED_SWIPE_PERIOD_SECS: u64 = 7;

#[derive(Debug, Parser)]
#[command(name = "cardwatch", version, about = "Wiegand card-read observer")]
struct Cli {
    /// Target reader name; defaults to the first reader the hub reports
    device: Option<String>,

    /// Emit one JSON object per observation instead of the text report
    #[arg(long)]
    json: bool,

    /// Also print the raw/payload debug representations
    #[arg(long, short)]
    verbose: bool,

    /// Hub host
    #[arg(long, default_value = DEFAULT_HUB_HOST)]
    host: String,

    /// Hub port
    #[arg(long, default_value_t = DEFAULT_HUB_PORT)]
    port: u16,

    /// Milliseconds to wait at the password prompt before using the default
    #[arg(long, default_value_t = DEFAULT_CREDENTIAL_TIMEOUT_MS)]
    password_timeout: u64,

    /// Milliseconds to sleep after each device poll
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut prompt = PromptCredentials::new(
        Duration::from_millis(cli.password_timeout),
        DEFAULT_HUB_PASSWORD,
    );
    let password = prompt.password().await?;

    let config = HubConfig {
        host: cli.host.clone(),
        port: cli.port,
        user: DEFAULT_HUB_USER.to_string(),
        password,
    };

    let hub = simulated_hub();
    let mut session = hub
        .open(&config)
        .with_context(|| format!("init error registering hub {}", config.addr_redacted()))?;

    let source = match &cli.device {
        Some(name) => session.find_source(name),
        None => session.first_source(),
    }?;

    let sim_info = source.info().await?;
    println!("Serial mode and protocol have been set. These should appear below:");
    println!("Mode =  {}", sim_info.serial_mode);
    println!("Protocol =  {}", sim_info.protocol);
    println!();

    let options = RenderOptions {
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
        verbose: cli.verbose,
    };

    // The prompt's stdin reader carries over so a comparison line typed
    // during startup still reaches the watch loop.
    let console = ConsoleOperator::new(prompt.into_stdin());
    let mut watch =
        WatchLoop::new(source, console).with_poll_delay(Duration::from_millis(cli.poll_interval));

    let mut stdout = std::io::stdout();
    watch.run(&mut stdout, &options).await?;
    Ok(())
}

/// Build the in-process hub with the simulated reader attached.
///
/// The feeder task replays [`SAMPLE_FRAMES`] on a fixed period and stops
/// once the reader is dropped.
fn simulated_hub() -> Hub {
    let (source, handle) = MockWiegand::new(SIMULATED_READER);

    info!(
        reader = SIMULATED_READER,
        period_secs = SIMULATED_SWIPE_PERIOD_SECS,
        "no capture backend compiled in; replaying sample frames"
    );

    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(SIMULATED_SWIPE_PERIOD_SECS));
        for raw in SAMPLE_FRAMES.iter().cycle() {
            ticker.tick().await;
            if handle.swipe(*raw).await.is_err() {
                break;
            }
        }
    });

    let mut hub = Hub::new(DEFAULT_HUB_PASSWORD);
    hub.register(SIMULATED_READER, source);
    hub
}
