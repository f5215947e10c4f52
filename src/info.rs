//! Bridge device description (`/description.xml`).

use serde::Deserialize;

use crate::errors::Error;

/// UPnP description document published by a bridge.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeInfo {
    #[serde(rename = "URLBase")]
    pub url_base: String,
    pub device: Device,
}

/// Device metadata of a bridge.
///
/// All fields stay empty until the description has been fetched, so an empty
/// `device_type` means no information is available.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Device {
    pub device_type: String,
    pub friendly_name: String,
    pub manufacturer: String,
    #[serde(rename = "manufacturerURL")]
    pub manufacturer_url: String,
    pub model_description: String,
    pub model_name: String,
    pub model_number: String,
    #[serde(rename = "modelURL")]
    pub model_url: String,
    pub serial_number: String,
    #[serde(rename = "UDN")]
    pub udn: String,
}

impl BridgeInfo {
    /// Parse the description document served at `/description.xml`.
    pub fn from_xml(xml: &str) -> Result<Self, Error> {
        quick_xml::de::from_str(xml).map_err(Error::XmlLoad)
    }

    /// Whether the description carried device metadata.
    pub fn is_populated(&self) -> bool {
        !self.device.device_type.is_empty()
    }
}
