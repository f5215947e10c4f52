//! Text rendering of bridges and scenes.

use crate::bridge::Bridge;
use crate::scene::Scene;

/// Formats a bridge for `hue-cli discover`.
///
/// The device block is only emitted when the description was fetched, which
/// is signalled by a non-empty device type.
pub fn bridge_to_string(bridge: &Bridge) -> String {
    let mut s = format!("Bridge:\n\tIP-address: {}", bridge.address());

    let device = &bridge.info().device;
    if !device.device_type.is_empty() {
        s.push_str(&format!(
            "\n\tDevice Information:\n\
             \t\tDeviceType: {}\n\
             \t\tFriendlyName: {}\n\
             \t\tManufacturer: {}\n\
             \t\tManufacturerURL: {}\n\
             \t\tModelDescription: {}\n\
             \t\tModelName: {}\n\
             \t\tModelNumber: {}\n\
             \t\tModelURL: {}\n\
             \t\tSerialNumber: {}\n\
             \t\tUDN: {}",
            device.device_type,
            device.friendly_name,
            device.manufacturer,
            device.manufacturer_url,
            device.model_description,
            device.model_name,
            device.model_number,
            device.model_url,
            device.serial_number,
            device.udn,
        ));
    }

    s
}

/// One line per scene: id, name and light count.
pub fn scene_line(scene: &Scene) -> String {
    format!("{}\t{}\t{} lights", scene.id, scene.name, scene.lights.len())
}

pub fn scene_to_string(scene: &Scene) -> String {
    let mut s = format!("Scene:\n\tID: {}\n\tName: {}", scene.id, scene.name);
    if let Some(kind) = scene.kind {
        s.push_str(&format!("\n\tType: {kind}"));
    }
    if let Some(group) = &scene.group {
        s.push_str(&format!("\n\tGroup: {group}"));
    }
    s.push_str(&format!("\n\tLights: {}", scene.lights.join(", ")));
    if let Some(owner) = &scene.owner {
        s.push_str(&format!("\n\tOwner: {owner}"));
    }
    if let Some(updated) = &scene.last_updated {
        s.push_str(&format!("\n\tLastUpdated: {updated}"));
    }
    if !scene.light_states.is_empty() {
        s.push_str("\n\tLightStates:");
        for (light, state) in &scene.light_states {
            s.push_str(&format!("\n\t\t{}: {}", light, state.describe()));
        }
    }
    s
}
