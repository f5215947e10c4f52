use std::path::PathBuf;

/// All error types that can occur when talking to a Hue bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("http request to {url} failed: {err}")]
    Http { url: String, err: reqwest::Error },

    /// The bridge or discovery endpoint answered with a non-success status.
    #[error("http request to {url} returned status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to deserialize JSON data.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// The bridge description document was not valid UPnP XML.
    #[error("failed to load description xml: {0}")]
    XmlLoad(quick_xml::de::DeError),

    /// A network socket operation failed during SSDP discovery.
    #[error("socket {action} error: {err:?}")]
    Socket { action: String, err: std::io::Error },

    /// The bridge rejected the request with a Hue API error object.
    #[error("bridge error {kind} at {address:?}: {description}")]
    Api {
        kind: u16,
        address: String,
        description: String,
    },

    /// The bridge answered with JSON that carries neither success nor error.
    #[error("unexpected response from bridge: {0}")]
    UnexpectedResponse(String),

    /// The operation needs an authorized user on the bridge.
    #[error("no user configured for bridge {0}")]
    NoUser(String),

    /// Failed to encode or decode a YAML configuration file.
    #[error("yaml error: {0}")]
    Yaml(serde_yaml::Error),

    /// Failed to read a configuration file from disk.
    #[error("failed to read {path}: {err}")]
    ConfigIo { path: PathBuf, err: std::io::Error },
}

impl Error {
    /// Hue error type returned when the link button was not pressed.
    pub const LINK_BUTTON_NOT_PRESSED: u16 = 101;

    /// Create a new http error
    pub fn http(url: &str, err: reqwest::Error) -> Self {
        Error::Http {
            url: url.to_string(),
            err,
        }
    }

    /// Create a new http status error
    pub fn http_status(url: &str, status: reqwest::StatusCode) -> Self {
        Error::HttpStatus {
            url: url.to_string(),
            status,
        }
    }

    /// Create a new socket error
    pub fn socket(action: &str, err: std::io::Error) -> Self {
        Error::Socket {
            action: action.to_string(),
            err,
        }
    }

    /// Create a new config file read error
    pub fn config_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Error::ConfigIo {
            path: path.into(),
            err,
        }
    }

    /// Returns true when the bridge refused user creation because the link
    /// button has not been pressed recently.
    pub fn is_link_button_not_pressed(&self) -> bool {
        matches!(self, Error::Api { kind, .. } if *kind == Self::LINK_BUTTON_NOT_PRESSED)
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
