//! Bridge discovery via the Hue cloud endpoint or SSDP multicast.

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout};

use crate::bridge::{Bridge, read_body};
use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

const SSDP_ADDR: &str = "239.255.255.250:1900";

const M_SEARCH: &str = "M-SEARCH * HTTP/1.1\r\n\
HOST: 239.255.255.250:1900\r\n\
MAN: \"ssdp:discover\"\r\n\
MX: 2\r\n\
ST: ssdp:all\r\n\r\n";

/// A bridge found on the network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscoveredBridge {
    /// Bridge id (derived from its MAC address)
    pub id: String,
    /// Address of the bridge on the local network
    #[serde(rename = "internalipaddress")]
    pub internal_ip_address: String,
    /// HTTPS port reported by the cloud endpoint
    #[serde(default)]
    pub port: Option<u16>,
}

impl DiscoveredBridge {
    /// Convert this discovered bridge into a [`Bridge`] handle.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let client = reqwest::Client::new();
    /// let found = find_bridges(&client, ClientSettings::DISCOVERY_URL).await?;
    /// for bridge in found {
    ///     let bridge = bridge.into_bridge(client.clone());
    /// }
    /// ```
    pub fn into_bridge(self, client: reqwest::Client) -> Bridge {
        Bridge::with_client(&self.internal_ip_address, client)
    }
}

/// Ask the Hue cloud discovery endpoint which bridges share this network.
///
/// # Examples
///
/// ```ignore
/// use hue_cli::{ClientSettings, find_bridges};
///
/// let settings = ClientSettings::default();
/// let client = settings.http_client()?;
/// let bridges = find_bridges(&client, &settings.discovery_url).await?;
/// println!("Found {} bridges", bridges.len());
/// for bridge in bridges {
///     println!("  {} - {}", bridge.internal_ip_address, bridge.id);
/// }
/// ```
pub async fn find_bridges(
    client: &reqwest::Client,
    discovery_url: &str,
) -> Result<Vec<DiscoveredBridge>> {
    debug!("GET {}", discovery_url);

    let resp = client
        .get(discovery_url)
        .send()
        .await
        .map_err(|e| Error::http(discovery_url, e))?;
    let body = read_body(discovery_url, resp).await?;
    serde_json::from_str(&body).map_err(Error::JsonLoad)
}

/// Discover bridges on the local network using an SSDP `M-SEARCH`.
///
/// Collects answers for `discovery_timeout` and keeps one entry per bridge id.
pub async fn discover_bridges_ssdp(discovery_timeout: Duration) -> Result<Vec<DiscoveredBridge>> {
    let socket = UdpSocket::bind("0.0.0.0:0")
        .await
        .map_err(|e| Error::socket("bind", e))?;

    socket
        .send_to(M_SEARCH.as_bytes(), SSDP_ADDR)
        .await
        .map_err(|e| Error::socket("send_to", e))?;

    Ok(collect_ssdp_answers(&socket, discovery_timeout).await)
}

/// Reads SSDP answers arriving on `socket` until `window` has elapsed.
async fn collect_ssdp_answers(socket: &UdpSocket, window: Duration) -> Vec<DiscoveredBridge> {
    collect_answers(window, move || async move {
        let mut buffer = vec![0u8; 4096];
        let (size, addr) = socket.recv_from(&mut buffer).await?;
        buffer.truncate(size);
        Ok((buffer, addr))
    })
    .await
}

async fn collect_answers<F, Fut>(window: Duration, mut recv: F) -> Vec<DiscoveredBridge>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<(Vec<u8>, SocketAddr)>>,
{
    let mut discovered: HashMap<String, DiscoveredBridge> = HashMap::new();
    let start = Instant::now();

    while let Some(remaining) = window.checked_sub(start.elapsed()) {
        match timeout(remaining, recv()).await {
            Ok(Ok((datagram, addr))) => {
                let Ok(response) = std::str::from_utf8(&datagram) else {
                    warn!("ignoring non utf-8 ssdp answer from {}", addr);
                    continue;
                };
                if let Some(bridge) = parse_ssdp_response(response, addr) {
                    discovered.insert(bridge.id.clone(), bridge);
                }
            }
            Ok(Err(e)) => warn!("failed to receive ssdp answer: {}", e),
            // Overall timeout elapsed
            Err(_) => break,
        }
    }

    let mut bridges: Vec<DiscoveredBridge> = discovered.into_values().collect();
    bridges.sort_by(|a, b| {
        (&a.internal_ip_address, &a.id).cmp(&(&b.internal_ip_address, &b.id))
    });
    bridges
}

/// Extracts a bridge from an SSDP answer, skipping other UPnP devices.
fn parse_ssdp_response(response: &str, from: SocketAddr) -> Option<DiscoveredBridge> {
    let headers: HashMap<String, &str> = response
        .lines()
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim()))
        .collect();

    let bridge_id = headers.get("hue-bridgeid").copied();
    let is_bridge = bridge_id.is_some()
        || headers
            .get("server")
            .is_some_and(|server| server.contains("IpBridge"));
    if !is_bridge {
        return None;
    }

    let ip = match from.ip() {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(_) => return None,
    };

    Some(DiscoveredBridge {
        id: bridge_id.map_or_else(|| ip.clone(), |id| id.to_ascii_lowercase()),
        internal_ip_address: ip,
        port: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ClientSettings;
    use httpmock::prelude::*;
    use std::collections::VecDeque;

    const HUE_ANSWER: &str = "HTTP/1.1 200 OK\r\n\
HOST: 239.255.255.250:1900\r\n\
EXT:\r\n\
CACHE-CONTROL: max-age=100\r\n\
LOCATION: http://192.168.1.10:80/description.xml\r\n\
SERVER: Linux/3.14.0 UPnP/1.0 IpBridge/1.48.0\r\n\
hue-bridgeid: 001788FFFEA1B2C3\r\n\
ST: upnp:rootdevice\r\n\
USN: uuid:2f402f80-da50-11e1-9b23-001788a1b2c3::upnp:rootdevice\r\n\r\n";

    const SONOS_ANSWER: &str = "HTTP/1.1 200 OK\r\nSERVER: Linux UPnP/1.0 Sonos/70.3\r\n\r\n";

    fn from(ip: &str) -> SocketAddr {
        format!("{ip}:1900").parse().unwrap()
    }

    #[test]
    fn test_parse_hue_answer() {
        let bridge = parse_ssdp_response(HUE_ANSWER, from("192.168.1.10")).unwrap();
        assert_eq!(bridge.id, "001788fffea1b2c3");
        assert_eq!(bridge.internal_ip_address, "192.168.1.10");
        assert_eq!(bridge.port, None);
    }

    #[test]
    fn test_parse_old_bridge_without_id() {
        let answer = "HTTP/1.1 200 OK\r\nSERVER: FreeRTOS/6.0.5, UPnP/1.0, IpBridge/0.1\r\n\r\n";
        let bridge = parse_ssdp_response(answer, from("10.0.0.5")).unwrap();
        assert_eq!(bridge.id, "10.0.0.5");
    }

    #[test]
    fn test_parse_other_device() {
        assert!(parse_ssdp_response(SONOS_ANSWER, from("10.0.0.7")).is_none());
    }

    #[tokio::test]
    async fn test_collect_ssdp_answers() {
        let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = listener.local_addr().unwrap();
        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        let second = HUE_ANSWER.replace("001788FFFEA1B2C3", "001788FFFED4E5F6");
        for answer in [HUE_ANSWER, second.as_str(), HUE_ANSWER, SONOS_ANSWER] {
            sender.send_to(answer.as_bytes(), target).await.unwrap();
        }

        let window = Duration::from_millis(300);
        let start = Instant::now();
        let bridges = collect_ssdp_answers(&listener, window).await;
        let elapsed = start.elapsed();

        assert!(elapsed < window + Duration::from_secs(1));
        let ids: Vec<&str> = bridges.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["001788fffea1b2c3", "001788fffed4e5f6"]);
        assert!(bridges.iter().all(|b| b.internal_ip_address == "127.0.0.1"));
    }

    #[tokio::test]
    async fn test_collect_answers_skips_receive_errors() {
        let mut datagrams = VecDeque::from([
            Err(io::Error::from(io::ErrorKind::ConnectionRefused)),
            Ok((vec![0xff, 0xfe], from("192.168.1.12"))),
            Ok((HUE_ANSWER.as_bytes().to_vec(), from("192.168.1.10"))),
        ]);

        let bridges = collect_answers(Duration::from_millis(100), || {
            let next = datagrams.pop_front();
            async move {
                match next {
                    Some(datagram) => datagram,
                    None => std::future::pending().await,
                }
            }
        })
        .await;

        assert_eq!(bridges.len(), 1);
        assert_eq!(bridges[0].internal_ip_address, "192.168.1.10");
    }

    #[test]
    fn test_discovered_bridge_serializes_cloud_names() {
        let bridge = parse_ssdp_response(HUE_ANSWER, from("192.168.1.10")).unwrap();
        let value = serde_json::to_value(&bridge).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "001788fffea1b2c3",
                "internalipaddress": "192.168.1.10",
                "port": null
            })
        );
        let back: DiscoveredBridge = serde_json::from_value(value).unwrap();
        assert_eq!(back, bridge);
    }

    #[tokio::test]
    async fn test_find_bridges() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).json_body(serde_json::json!([
                    {"id": "001788fffea1b2c3", "internalipaddress": "192.168.1.10", "port": 443},
                    {"id": "001788fffed4e5f6", "internalipaddress": "192.168.1.11"}
                ]));
            })
            .await;

        let client = ClientSettings::default().http_client().unwrap();
        let bridges = find_bridges(&client, &server.url("/")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(bridges.len(), 2);
        assert_eq!(bridges[0].internal_ip_address, "192.168.1.10");
        assert_eq!(bridges[0].port, Some(443));
        assert_eq!(bridges[1].port, None);
    }

    #[tokio::test]
    async fn test_find_bridges_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("[]");
            })
            .await;

        let client = ClientSettings::default().http_client().unwrap();
        assert!(find_bridges(&client, &server.url("/")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_bridges_rate_limited() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(429);
            })
            .await;

        let client = ClientSettings::default().http_client().unwrap();
        let err = find_bridges(&client, &server.url("/")).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { .. }));
    }
}
