//! Scenes stored on a bridge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString};

/// The kind of a stored scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum SceneType {
    /// Scene over an explicit list of lights
    LightScene,
    /// Scene bound to a group; its lights follow the group
    GroupScene,
}

/// A scene as returned by `/api/<user>/scenes[/<id>]`.
///
/// The bridge keys scenes by id, so `id` is filled in after decoding.
/// `light_states` is only present when a single scene is requested.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Scene {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<SceneType>,
    pub group: Option<String>,
    #[serde(default)]
    pub lights: Vec<String>,
    pub owner: Option<String>,
    #[serde(default)]
    pub recycle: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(rename = "appdata")]
    pub app_data: Option<Value>,
    pub picture: Option<String>,
    #[serde(rename = "lastupdated")]
    pub last_updated: Option<String>,
    pub version: Option<u8>,
    #[serde(
        rename = "lightstates",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub light_states: BTreeMap<String, LightState>,
}

/// Stored state of one light inside a scene.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LightState {
    pub on: Option<bool>,
    pub bri: Option<u8>,
    pub hue: Option<u16>,
    pub sat: Option<u8>,
    pub xy: Option<[f32; 2]>,
    pub ct: Option<u16>,
    pub effect: Option<String>,
    #[serde(rename = "transitiontime")]
    pub transition_time: Option<u16>,
}

impl Scene {
    pub(crate) fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl LightState {
    /// Renders the set attributes as `key=value` pairs.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(on) = self.on {
            parts.push(format!("on={on}"));
        }
        if let Some(bri) = self.bri {
            parts.push(format!("bri={bri}"));
        }
        if let Some(hue) = self.hue {
            parts.push(format!("hue={hue}"));
        }
        if let Some(sat) = self.sat {
            parts.push(format!("sat={sat}"));
        }
        if let Some([x, y]) = self.xy {
            parts.push(format!("xy={x},{y}"));
        }
        if let Some(ct) = self.ct {
            parts.push(format!("ct={ct}"));
        }
        if let Some(effect) = &self.effect {
            parts.push(format!("effect={effect}"));
        }
        if let Some(tt) = self.transition_time {
            parts.push(format!("transitiontime={tt}"));
        }
        parts.join(" ")
    }
}
