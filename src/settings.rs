//! Client settings shared by discovery and bridge requests.

use std::time::Duration;

use crate::errors::Error;

/// Network settings for talking to bridges and the discovery endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// N-UPnP endpoint listing the bridges seen from this network
    pub discovery_url: String,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
    /// How long to collect SSDP answers
    pub ssdp_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            discovery_url: Self::DISCOVERY_URL.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            ssdp_timeout: Duration::from_secs(Self::DEFAULT_SSDP_TIMEOUT_SECS),
        }
    }
}

impl ClientSettings {
    pub const DISCOVERY_URL: &'static str = "https://discovery.meethue.com/";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_SSDP_TIMEOUT_SECS: u64 = 3;

    /// Builds an HTTP client honoring the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .user_agent(concat!("hue-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .map_err(Error::Client)
    }
}
