//! # hue_cli
//!
//! A small async client for Philips Hue bridges and the `hue-cli` command
//! line front-end built on top of it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hue_cli::{Bridge, ClientSettings, find_bridges};
//!
//! async fn register() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ClientSettings::default();
//!     let client = settings.http_client()?;
//!     for found in find_bridges(&client, &settings.discovery_url).await? {
//!         let mut bridge = found.into_bridge(client.clone());
//!         bridge.get_info().await?;
//!         println!("{}", bridge.info().device.friendly_name);
//!     }
//!
//!     // Press the link button on the bridge first
//!     let bridge = Bridge::connect("192.168.1.10").await?;
//!     let user = bridge.create_user("hue-cli#laptop").await?;
//!     println!("new user: {user}");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Discovery**: Find bridges through the Hue cloud endpoint with
//!   [`find_bridges`] or on the LAN with [`discover_bridges_ssdp`]
//! - **Bridge Info**: Read the UPnP device description with [`Bridge::get_info`]
//! - **User Registration**: Create API users with [`Bridge::create_user`]
//! - **Scenes**: List and inspect stored [`Scene`]s
//! - **Config Files**: Read and write [`ConfigFile`] YAML snippets
//!
//! ## Communication
//!
//! Bridges are reached over plain HTTP on their local address. Discovery uses
//! either HTTPS to `discovery.meethue.com` or SSDP multicast on
//! `239.255.255.250:1900`.

mod api;
mod bridge;
pub mod cli;
mod config_file;
mod discovery;
mod errors;
mod info;
mod response;
mod scene;
mod settings;

// Re-export public API
pub use api::{HttpApi, HueApi};
pub use bridge::Bridge;
pub use config_file::{BridgeConfig, ConfigFile};
pub use discovery::{DiscoveredBridge, discover_bridges_ssdp, find_bridges};
pub use errors::Error;
pub use info::{BridgeInfo, Device};
pub use response::ApiError;
pub use scene::{LightState, Scene, SceneType};
pub use settings::ClientSettings;
