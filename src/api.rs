//! The bridge operations the command line front-end depends on.

use std::future::Future;

use crate::bridge::Bridge;
use crate::discovery::{discover_bridges_ssdp, find_bridges};
use crate::errors::Error;
use crate::scene::Scene;
use crate::settings::ClientSettings;

type Result<T> = std::result::Result<T, Error>;

/// Operations consumed by the `hue-cli` commands.
///
/// [`HttpApi`] talks to real bridges; tests provide scripted implementations.
pub trait HueApi {
    /// Find all bridges on the network.
    fn find_bridges(&self) -> impl Future<Output = Result<Vec<Bridge>>>;

    /// Open a bridge at a known address, verifying it answers.
    fn connect(&self, address: &str) -> impl Future<Output = Result<Bridge>>;

    /// Refresh the device description of a bridge.
    fn get_info(&self, bridge: &mut Bridge) -> impl Future<Output = Result<()>>;

    /// Register a new user; returns the username.
    fn create_user(&self, bridge: &Bridge, app_name: &str)
    -> impl Future<Output = Result<String>>;

    /// Handle for a bridge with an existing user, without network access.
    fn open(&self, address: &str, user: &str) -> Bridge;

    fn get_scenes(&self, bridge: &Bridge) -> impl Future<Output = Result<Vec<Scene>>>;

    fn get_scene(&self, bridge: &Bridge, id: &str) -> impl Future<Output = Result<Scene>>;
}

/// [`HueApi`] backed by HTTP requests to real bridges.
#[derive(Debug, Clone)]
pub struct HttpApi {
    settings: ClientSettings,
    client: reqwest::Client,
    local_discovery: bool,
}

impl HttpApi {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let client = settings.http_client()?;
        Ok(HttpApi {
            settings,
            client,
            local_discovery: false,
        })
    }

    /// Use SSDP multicast instead of the cloud endpoint for discovery.
    pub fn with_local_discovery(mut self, local: bool) -> Self {
        self.local_discovery = local;
        self
    }
}

impl HueApi for HttpApi {
    async fn find_bridges(&self) -> Result<Vec<Bridge>> {
        let found = if self.local_discovery {
            discover_bridges_ssdp(self.settings.ssdp_timeout).await?
        } else {
            find_bridges(&self.client, &self.settings.discovery_url).await?
        };

        Ok(found
            .into_iter()
            .map(|b| b.into_bridge(self.client.clone()))
            .collect())
    }

    async fn connect(&self, address: &str) -> Result<Bridge> {
        let mut bridge = Bridge::with_client(address, self.client.clone());
        bridge.get_info().await?;
        Ok(bridge)
    }

    async fn get_info(&self, bridge: &mut Bridge) -> Result<()> {
        bridge.get_info().await
    }

    async fn create_user(&self, bridge: &Bridge, app_name: &str) -> Result<String> {
        bridge.create_user(app_name).await
    }

    fn open(&self, address: &str, user: &str) -> Bridge {
        Bridge::with_client(address, self.client.clone()).with_user(user)
    }

    async fn get_scenes(&self, bridge: &Bridge) -> Result<Vec<Scene>> {
        bridge.get_scenes().await
    }

    async fn get_scene(&self, bridge: &Bridge, id: &str) -> Result<Scene> {
        bridge.get_scene(id).await
    }
}
