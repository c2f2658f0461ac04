//! Icon-font class lookups for ships and upgrade slots.

const SHIP_PREFIX: &str = "xwing-miniatures-ship-";

/// Ship xws keys whose glyph name differs from the data feed.
const SHIP_ALIASES: &[(&str, &str)] = &[("tieininterceptor", "tieinterceptor")];

/// Normalised glyph name for a ship xws key or icon key.
pub fn ship_glyph(key: &str) -> Option<String> {
    let lower = key.trim().to_ascii_lowercase();
    let name = lower.strip_prefix(SHIP_PREFIX).unwrap_or(&lower);
    if name.is_empty() {
        return None;
    }
    let name = SHIP_ALIASES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
        .unwrap_or(name);
    Some(name.to_string())
}

/// Full class list for a ship glyph, e.g.
/// `xwing-miniatures-ship xwing-miniatures-ship-t65xwing`.
pub fn ship_icon_class(key: &str) -> Option<String> {
    ship_glyph(key).map(|name| format!("xwing-miniatures-ship {SHIP_PREFIX}{name}"))
}

/// `(slot key, display label)` for every upgrade slot the icon font knows.
pub const UPGRADE_TYPES: &[(&str, &str)] = &[
    ("astromech", "Astromech"),
    ("cannon", "Cannon"),
    ("cargo", "Cargo"),
    ("command", "Command"),
    ("configuration", "Configuration"),
    ("crew", "Crew"),
    ("device", "Device"),
    ("force-power", "Force Power"),
    ("gunner", "Gunner"),
    ("hyperspace", "Hyperspace"),
    ("hardpoint", "Hardpoint"),
    ("hyperdrive", "Hyperdrive"),
    ("illicit", "Illicit"),
    ("missile", "Missile"),
    ("modification", "Modification"),
    ("sensor", "Sensor"),
    ("tactical-relay", "Tactical Relay"),
    ("talent", "Talent"),
    ("team", "Team"),
    ("tech", "Tech"),
    ("title", "Title"),
    ("turret", "Turret"),
];

fn slot_key(slot: &str) -> String {
    slot.trim().to_ascii_lowercase().replace([' ', '_'], "-")
}

pub fn upgrade_type_label(slot: &str) -> String {
    let key = slot_key(slot);
    UPGRADE_TYPES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| slot.trim().to_string())
}

pub fn upgrade_slot_icon_class(slot: &str) -> Option<String> {
    let key = slot_key(slot);
    if key.is_empty() {
        return None;
    }
    let glyph = key.replace('-', "");
    Some(format!("xwing-miniatures-font xwing-miniatures-font-{glyph}"))
}
