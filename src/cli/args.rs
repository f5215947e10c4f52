//! CLI argument definitions using clap

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::settings::ClientSettings;

/// Commandline application to discover Hue bridges and register users on them
#[derive(Parser, Debug)]
#[command(name = "hue-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Filename with the configuration (optional)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Bridge discovery endpoint
    #[arg(
        long,
        global = true,
        env = "HUE_DISCOVERY_URL",
        default_value = ClientSettings::DISCOVERY_URL
    )]
    pub discovery_url: String,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = ClientSettings::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover bridges
    ///
    /// Requests the known bridges in this network from https://discovery.meethue.com/
    Discover {
        #[command(flatten)]
        target: BridgeArgs,
    },

    /// Create a new user on the bridge
    ///
    /// The 'link button' on the bridge should have been pressed in advance.
    CreateUser {
        #[command(flatten)]
        target: BridgeArgs,

        /// Name of the device hue-cli is running on (optional)
        #[arg(long, default_value_t = default_device_name())]
        device: String,
    },

    /// List the scenes of a configured bridge
    Scenes {
        /// IP-address of the bridge in the configuration (optional)
        #[arg(long)]
        bridge: Option<String>,

        /// Show a single scene with its light states
        #[arg(long)]
        scene: Option<String>,
    },
}

/// How to locate the bridge.
#[derive(Args, Debug, Clone, Default)]
pub struct BridgeArgs {
    /// IP-address of the bridge (optional)
    #[arg(long)]
    pub bridge: Option<String>,

    /// Search the local network with SSDP instead of the discovery endpoint
    #[arg(long)]
    pub local: bool,
}

impl Cli {
    pub fn settings(&self) -> ClientSettings {
        ClientSettings {
            discovery_url: self.discovery_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..ClientSettings::default()
        }
    }
}

/// Host name of this machine, or `unknown`.
pub fn default_device_name() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
