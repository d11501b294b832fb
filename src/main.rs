//! rjsocks CLI Application

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rjsocks::adapter::{list_adapters, list_devices, select_device, SystemInterfaces};
use rjsocks::{lease, text, ClientConfig, DEFAULT_CONFIG_FILE};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "rjsocks")]
#[command(about = "802.1X vendor client handshake frame tool")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List network adapter names
    Adapters,

    /// List capture device descriptions
    Devices,

    /// Build a tagged handshake frame and print it as hex
    Frame {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,

        /// Adapter name (overrides the configuration)
        #[arg(short, long)]
        adapter: Option<String>,

        /// Hardware address to embed instead of the adapter's own
        #[arg(long)]
        mac: Option<String>,

        /// Obfuscate the leading field after tagging
        #[arg(long)]
        obfuscate: bool,
    },

    /// Renew the DHCP lease on an adapter
    Renew {
        /// Adapter name
        adapter: String,
    },

    /// Decode GBK bytes given as hex
    Decode {
        /// Hex-encoded GBK text
        #[arg(value_name = "HEX")]
        input: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG (standard), then RUST_LOG_LEVEL (custom, e.g., "debug"), then --verbose flag
    let fallback = if cli.verbose { "debug" } else { "info" };
    let default_level = std::env::var("RUST_LOG_LEVEL").unwrap_or_else(|_| fallback.to_string());
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).without_time())
        .try_init()
        .ok();

    match cli.command {
        Command::Adapters => {
            for name in list_adapters(&SystemInterfaces::new())? {
                println!("{name}");
            }
        }
        Command::Devices => {
            for desc in list_devices(&SystemInterfaces::new())? {
                println!("{desc}");
            }
        }
        Command::Frame {
            config,
            adapter,
            mac,
            obfuscate,
        } => {
            let config = resolve_config(config.as_deref(), adapter, mac, obfuscate)?;
            let source = SystemInterfaces::new();
            match select_device(&source, config.device_description()) {
                Ok(dev) => info!(
                    "Using capture device {} ({})",
                    dev.display_description(),
                    dev.name
                ),
                Err(e) => warn!("{e}"),
            }
            let frame = rjsocks::build_frame(&config, &source)
                .with_context(|| format!("Failed to build frame for {}", config.adapter))?;
            info!("Built {} byte frame for {}", frame.len(), config.adapter);
            println!("{}", hex::encode(&frame));

            if config.renew_lease {
                lease::renew_lease(&config.adapter)?
                    .await
                    .context("Lease renewal task failed")?;
            }
        }
        Command::Renew { adapter } => {
            let handle = lease::renew_lease(&adapter)?;
            handle.await.context("Lease renewal task failed")?;
        }
        Command::Decode { input } => {
            let bytes = hex::decode(input.trim()).context("Input is not valid hex")?;
            match text::gbk_to_utf8(&bytes) {
                Ok(s) => println!("{s}"),
                Err(e) => {
                    warn!("{e}, printing with replacements");
                    println!("{}", text::gbk_to_utf8_lossy(&bytes));
                }
            }
        }
    }
    Ok(())
}

/// Merge the configuration file (if any) with command-line overrides.
fn resolve_config(
    path: Option<&str>,
    adapter: Option<String>,
    mac: Option<String>,
    obfuscate: bool,
) -> Result<ClientConfig> {
    let path = path.or_else(|| {
        Path::new(DEFAULT_CONFIG_FILE)
            .exists()
            .then_some(DEFAULT_CONFIG_FILE)
    });

    let mut config = match (path, adapter.as_ref()) {
        (Some(p), _) => {
            info!("Loading configuration from: {}", p);
            ClientConfig::load(p)
                .with_context(|| format!("Failed to load configuration from: {p}"))?
        }
        (None, Some(name)) => ClientConfig::new(name.clone()),
        (None, None) => bail!("No adapter given: pass --adapter or provide {DEFAULT_CONFIG_FILE}"),
    };

    if let Some(name) = adapter {
        config.adapter = name;
    }
    if mac.is_some() {
        config.hardware_address = mac;
    }
    config.obfuscate_leading_field |= obfuscate;
    config.validate()?;
    Ok(config)
}
