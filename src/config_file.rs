//! YAML configuration snippets listing bridges and their users.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// A bridge together with the user registered on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BridgeConfig {
    #[serde(rename = "ipaddress")]
    pub ip_address: String,
    pub user: String,
}

/// Configuration file as printed by `hue-cli create-user`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub bridges: Vec<BridgeConfig>,
}

impl ConfigFile {
    pub fn new(bridges: Vec<BridgeConfig>) -> Self {
        ConfigFile { bridges }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        serde_yaml::from_str(yaml).map_err(Error::Yaml)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let yaml = std::fs::read_to_string(path).map_err(|e| Error::config_io(path, e))?;
        Self::from_yaml(&yaml)
    }
}
