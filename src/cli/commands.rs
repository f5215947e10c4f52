//! Command dispatch: resolve bridges, call the bridge API, print results.

use std::io::Write;
use std::path::PathBuf;

use log::{debug, info};

use crate::api::HueApi;
use crate::bridge::Bridge;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output::{bridge_to_string, scene_line, scene_to_string};
use crate::config_file::{BridgeConfig, ConfigFile};

/// Prefix of the application id registered with the bridge.
pub const APP_NAME: &str = "hue-cli";

/// Parsed options handed to every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Address given with `--bridge`; skips discovery when set
    pub bridge: Option<String>,
    /// Accepted for every command, only read by `scenes`
    pub config: Option<PathBuf>,
    /// Device part of the application id
    pub device: String,
    /// Scene to show in detail
    pub scene: Option<String>,
}

impl Options {
    pub fn from_cli(cli: &Cli) -> Self {
        let mut opts = Options {
            config: cli.config.clone(),
            ..Options::default()
        };
        match &cli.command {
            Commands::Discover { target } => {
                opts.bridge.clone_from(&target.bridge);
            }
            Commands::CreateUser { target, device } => {
                opts.bridge.clone_from(&target.bridge);
                opts.device.clone_from(device);
            }
            Commands::Scenes { bridge, scene } => {
                opts.bridge.clone_from(bridge);
                opts.scene.clone_from(scene);
            }
        }
        opts
    }

    /// The `--bridge` address, ignoring an empty value.
    fn bridge_address(&self) -> Option<&str> {
        self.bridge.as_deref().filter(|address| !address.is_empty())
    }

    fn app_name(&self) -> String {
        format!("{}#{}", APP_NAME, self.device)
    }
}

/// Runs the parsed command against `api`, writing results to `out`.
pub async fn execute_command<A: HueApi, W: Write>(
    cli: &Cli,
    api: &A,
    out: &mut W,
) -> CommandResult<()> {
    let opts = Options::from_cli(cli);
    debug!("running {:?} with {:?}", cli.command, opts);

    match &cli.command {
        Commands::Discover { .. } => discover(api, &opts, out).await,
        Commands::CreateUser { .. } => create_user(api, &opts, out).await,
        Commands::Scenes { .. } => scenes(api, &opts, out).await,
    }
}

/// Prints every resolved bridge. Failing to fetch the info of one bridge
/// only produces a warning.
pub async fn discover<A: HueApi, W: Write>(
    api: &A,
    opts: &Options,
    out: &mut W,
) -> CommandResult<()> {
    let bridges = resolve_bridges(api, opts).await?;

    writeln!(out, "Found {} bridges", bridges.len())?;
    for mut bridge in bridges {
        if let Err(e) = api.get_info(&mut bridge).await {
            writeln!(
                out,
                "WARNING: failed to get info for bridge at {} ({})",
                bridge.address(),
                e
            )?;
        }
        writeln!(out, "{}", bridge_to_string(&bridge))?;
    }
    Ok(())
}

/// Registers a user on exactly one bridge and prints the resulting
/// configuration as YAML.
pub async fn create_user<A: HueApi, W: Write>(
    api: &A,
    opts: &Options,
    out: &mut W,
) -> CommandResult<()> {
    let bridge = single(resolve_bridges(api, opts).await?)?;

    let app_name = opts.app_name();
    info!("creating user {} on bridge {}", app_name, bridge.address());
    let user = api.create_user(&bridge, &app_name).await?;

    let config = ConfigFile::new(vec![BridgeConfig {
        ip_address: bridge.address().to_string(),
        user,
    }]);
    let yaml = config.to_yaml().map_err(CommandError::Encode)?;
    write!(out, "{yaml}")?;
    Ok(())
}

/// Lists the scenes of a bridge taken from the `--config` file.
pub async fn scenes<A: HueApi, W: Write>(
    api: &A,
    opts: &Options,
    out: &mut W,
) -> CommandResult<()> {
    let path = opts
        .config
        .as_deref()
        .ok_or(CommandError::MissingConfig { command: "scenes" })?;
    let config = ConfigFile::load(path)?;

    let entries: Vec<BridgeConfig> = match opts.bridge_address() {
        Some(address) => config
            .bridges
            .into_iter()
            .filter(|entry| entry.ip_address == address)
            .collect(),
        None => config.bridges,
    };
    let entry = single(entries)?;
    let bridge = api.open(&entry.ip_address, &entry.user);

    match &opts.scene {
        Some(id) => {
            let scene = api.get_scene(&bridge, id).await?;
            writeln!(out, "{}", scene_to_string(&scene))?;
        }
        None => {
            let scenes = api.get_scenes(&bridge).await?;
            writeln!(out, "Found {} scenes", scenes.len())?;
            for scene in &scenes {
                writeln!(out, "{}", scene_line(scene))?;
            }
        }
    }
    Ok(())
}

/// Resolves the bridges to work on.
///
/// A `--bridge` address is connected to directly and discovery is skipped.
async fn resolve_bridges<A: HueApi>(api: &A, opts: &Options) -> CommandResult<Vec<Bridge>> {
    match opts.bridge_address() {
        Some(address) => {
            let bridge = api
                .connect(address)
                .await
                .map_err(|source| CommandError::BridgeNotFound {
                    address: address.to_string(),
                    source,
                })?;
            Ok(vec![bridge])
        }
        None => Ok(api.find_bridges().await?),
    }
}

/// Exactly one candidate is required; the user must disambiguate otherwise.
fn single<T>(mut candidates: Vec<T>) -> CommandResult<T> {
    match candidates.len() {
        0 => Err(CommandError::NoBridgeFound),
        1 => Ok(candidates.remove(0)),
        count => Err(CommandError::AmbiguousBridges { count }),
    }
}
