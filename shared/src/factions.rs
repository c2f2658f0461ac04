use serde::{Deserialize, Serialize};

/// Playable factions keyed by their xws identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    RebelAlliance,
    GalacticEmpire,
    ScumAndVillainy,
    Resistance,
    FirstOrder,
    GalacticRepublic,
    SeparatistAlliance,
    Unknown,
}

impl Faction {
    /// Every real faction, in menu order. `Unknown` is deliberately absent.
    pub const ALL: [Faction; 7] = [
        Faction::RebelAlliance,
        Faction::GalacticEmpire,
        Faction::ScumAndVillainy,
        Faction::Resistance,
        Faction::FirstOrder,
        Faction::GalacticRepublic,
        Faction::SeparatistAlliance,
    ];

    /// Lookup by xws key. Case and surrounding whitespace are ignored;
    /// anything unrecognised maps to `Unknown`.
    pub fn from_xws(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "rebelalliance" => Faction::RebelAlliance,
            "galacticempire" => Faction::GalacticEmpire,
            "scumandvillainy" => Faction::ScumAndVillainy,
            "resistance" => Faction::Resistance,
            "firstorder" => Faction::FirstOrder,
            "galacticrepublic" => Faction::GalacticRepublic,
            "separatistalliance" => Faction::SeparatistAlliance,
            _ => Faction::Unknown,
        }
    }

    pub fn xws(self) -> &'static str {
        match self {
            Faction::RebelAlliance => "rebelalliance",
            Faction::GalacticEmpire => "galacticempire",
            Faction::ScumAndVillainy => "scumandvillainy",
            Faction::Resistance => "resistance",
            Faction::FirstOrder => "firstorder",
            Faction::GalacticRepublic => "galacticrepublic",
            Faction::SeparatistAlliance => "separatistalliance",
            Faction::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Faction::RebelAlliance => "Rebel Alliance",
            Faction::GalacticEmpire => "Galactic Empire",
            Faction::ScumAndVillainy => "Scum & Villainy",
            Faction::Resistance => "Resistance",
            Faction::FirstOrder => "First Order",
            Faction::GalacticRepublic => "Galactic Republic",
            Faction::SeparatistAlliance => "Separatist Alliance",
            Faction::Unknown => "Unknown",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Faction::RebelAlliance => "#FF3333",
            Faction::GalacticEmpire => "#2979FF",
            Faction::ScumAndVillainy => "#006400",
            Faction::Resistance => "#FF8C00",
            Faction::FirstOrder => "#800020",
            Faction::GalacticRepublic => "#E6D690",
            Faction::SeparatistAlliance => "#607D8B",
            Faction::Unknown => "#666666",
        }
    }

    /// Glyph class from the x-wing miniatures icon font.
    pub fn icon_class(self) -> Option<&'static str> {
        match self {
            // The font has no dedicated resistance glyph.
            Faction::RebelAlliance | Faction::Resistance => Some("xwing-miniatures-font-rebel"),
            Faction::GalacticEmpire => Some("xwing-miniatures-font-empire"),
            Faction::ScumAndVillainy => Some("xwing-miniatures-font-scum"),
            Faction::FirstOrder => Some("xwing-miniatures-font-firstorder"),
            Faction::GalacticRepublic => Some("xwing-miniatures-font-republic"),
            Faction::SeparatistAlliance => Some("xwing-miniatures-font-separatists"),
            Faction::Unknown => None,
        }
    }
}

pub fn faction_color(key: &str) -> &'static str {
    Faction::from_xws(key).color()
}

pub fn faction_label(key: &str) -> &'static str {
    Faction::from_xws(key).label()
}

pub fn faction_icon_class(key: &str) -> Option<&'static str> {
    Faction::from_xws(key).icon_class()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_share_the_unknown_entry() {
        assert_eq!(faction_color("unknown-key"), faction_color("unknown"));
        assert_eq!(faction_color("unknown"), "#666666");
        assert_eq!(faction_label(""), "Unknown");
        assert_eq!(faction_icon_class("nope"), None);
    }

    #[test]
    fn known_factions_resolve_case_insensitively() {
        assert_eq!(faction_color("GalacticEmpire"), "#2979FF");
        assert_eq!(faction_label("scumandvillainy"), "Scum & Villainy");
        assert_eq!(
            faction_icon_class("resistance"),
            Some("xwing-miniatures-font-rebel")
        );
    }

    #[test]
    fn xws_keys_round_trip_for_every_faction() {
        for faction in Faction::ALL {
            assert_eq!(Faction::from_xws(faction.xws()), faction);
            assert!(faction.icon_class().is_some());
        }
    }
}
