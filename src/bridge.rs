//! Individual bridge access.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::errors::Error;
use crate::info::BridgeInfo;
use crate::response::{self, ApiResponse};
use crate::scene::Scene;

type Result<T> = std::result::Result<T, Error>;

/// Represents a single Hue bridge.
///
/// A `Bridge` talks to the bridge's local REST API over HTTP. It is identified
/// by its address (an IP, optionally with a port) and may carry the username
/// that authorizes API calls.
///
/// # Example
///
/// ```
/// use hue_cli::Bridge;
///
/// let bridge = Bridge::new("192.168.1.10");
/// assert_eq!(bridge.address(), "192.168.1.10");
/// assert!(!bridge.info().is_populated());
/// ```
#[derive(Debug, Clone)]
pub struct Bridge {
    address: String,
    user: Option<String>,
    info: BridgeInfo,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CreatedUser {
    username: String,
}

impl Bridge {
    pub fn new(address: &str) -> Self {
        Self::with_client(address, reqwest::Client::new())
    }

    pub fn with_client(address: &str, client: reqwest::Client) -> Self {
        Bridge {
            address: address.to_string(),
            user: None,
            info: BridgeInfo::default(),
            client,
        }
    }

    /// Attaches the username used for authorized calls.
    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    /// Replaces the cached device description.
    pub fn with_info(mut self, info: BridgeInfo) -> Self {
        self.info = info;
        self
    }

    /// Creates a bridge handle and checks it is reachable by fetching its
    /// description.
    pub async fn connect(address: &str) -> Result<Self> {
        let mut bridge = Self::new(address);
        bridge.get_info().await?;
        Ok(bridge)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn info(&self) -> &BridgeInfo {
        &self.info
    }

    /// Fetches `/description.xml` and caches the device metadata.
    pub async fn get_info(&mut self) -> Result<()> {
        let body = self.get_text("/description.xml").await?;
        self.info = BridgeInfo::from_xml(&body)?;
        debug!(
            "bridge {} is {:?}",
            self.address, self.info.device.friendly_name
        );
        Ok(())
    }

    /// Registers a new API user and returns its username.
    ///
    /// The bridge refuses with error type 101 unless its link button was
    /// pressed shortly before.
    pub async fn create_user(&self, device_type: &str) -> Result<String> {
        let entries: Vec<ApiResponse<CreatedUser>> = self
            .post_json("/api", &json!({ "devicetype": device_type }))
            .await?;
        let created = response::first_success(entries)?;
        debug!("created user on bridge {}", self.address);
        Ok(created.username)
    }

    /// Lists all scenes, ordered by id.
    pub async fn get_scenes(&self) -> Result<Vec<Scene>> {
        let path = format!("/api/{}/scenes", self.require_user()?);
        let scenes: HashMap<String, Scene> = response::decode(self.get_json(&path).await?)?;

        let mut scenes: Vec<Scene> = scenes
            .into_iter()
            .map(|(id, scene)| scene.with_id(id))
            .collect();
        scenes.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(scenes)
    }

    /// Fetches one scene including its light states.
    pub async fn get_scene(&self, id: &str) -> Result<Scene> {
        let path = format!("/api/{}/scenes/{}", self.require_user()?, id);
        let scene: Scene = response::decode(self.get_json(&path).await?)?;
        Ok(scene.with_id(id))
    }

    fn require_user(&self) -> Result<&str> {
        self.user
            .as_deref()
            .ok_or_else(|| Error::NoUser(self.address.clone()))
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        debug!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::http(&url, e))?;
        read_body(&url, resp).await
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let body = self.get_text(path).await?;
        serde_json::from_str(&body).map_err(Error::JsonLoad)
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, msg: &Value) -> Result<T> {
        let url = self.url(path);
        debug!("POST {} {}", url, msg);
        let resp = self
            .client
            .post(&url)
            .json(msg)
            .send()
            .await
            .map_err(|e| Error::http(&url, e))?;
        let body = read_body(&url, resp).await?;
        debug!("response: {}", body);
        serde_json::from_str(&body).map_err(Error::JsonLoad)
    }
}

pub(crate) async fn read_body(url: &str, resp: reqwest::Response) -> Result<String> {
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::http_status(url, status));
    }
    resp.text().await.map_err(|e| Error::http(url, e))
}
