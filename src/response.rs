//! Hue API response envelopes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// An error object as reported by the bridge.
///
/// The bridge answers failed requests with a list such as
/// `[{"error": {"type": 101, "address": "", "description": "link button not pressed"}}]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: u16,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api {
            kind: err.kind,
            address: err.address,
            description: err.description,
        }
    }
}

/// A single entry of a write response list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ApiResponse<T> {
    Success(T),
    Error(ApiError),
}

/// Returns the first success entry, or the first error entry as [`Error::Api`].
pub(crate) fn first_success<T>(entries: Vec<ApiResponse<T>>) -> Result<T> {
    let mut first_error = None;
    for entry in entries {
        match entry {
            ApiResponse::Success(value) => return Ok(value),
            ApiResponse::Error(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err.into()),
        None => Err(Error::UnexpectedResponse("empty response list".to_string())),
    }
}

/// Decodes a read response.
///
/// Reads return the resource itself on success, but a list of error objects
/// when the request was refused (e.g. unknown user).
pub(crate) fn decode<T: DeserializeOwned>(body: Value) -> Result<T> {
    if let Value::Array(items) = &body
        && let Some(err) = items
            .iter()
            .filter_map(|item| item.get("error"))
            .find_map(|err| serde_json::from_value::<ApiError>(err.clone()).ok())
    {
        return Err(err.into());
    }

    serde_json::from_value(body).map_err(Error::JsonLoad)
}
