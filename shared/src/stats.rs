//! Read-only records returned by the analytics backend.
//!
//! Field names match the JSON wire format. Every field defaults so that a
//! missing or malformed optional value never fails a whole response.

use serde::{Deserialize, Deserializer, Serialize};

use crate::win_rate::WinRate;

/// Accept a JSON number, a numeric string, or null. Anything else becomes 0.
fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_number(&value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round().min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_number(&value).map(|n| n.round() as i64).unwrap_or(0))
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_number(&value).unwrap_or(0.0))
}

fn lenient_number(value: &serde_json::Value) -> Option<f64> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeEntry {
    pub name: String,
    pub xws: String,
    pub slot: String,
    pub slot_icon: String,
    pub image: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub points: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotEntry {
    pub name: String,
    pub xws: String,
    pub ship_name: String,
    pub ship_icon: String,
    pub image: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub points: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub loadout: i64,
    pub upgrades: Vec<UpgradeEntry>,
}

/// Aggregate of one squad list signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListEntry {
    pub signature: String,
    pub faction: String,
    pub faction_key: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub points: i64,
    /// Number of times the list was fielded.
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub games: u32,
    pub win_rate: WinRate,
    #[serde(deserialize_with = "lenient_i64")]
    pub total_loadout: i64,
    pub pilots: Vec<PilotEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactionStat {
    pub name: String,
    pub xws: String,
    pub icon_char: String,
    pub win_rate: WinRate,
    #[serde(deserialize_with = "lenient_u32")]
    pub popularity: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub games: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub wins: u32,
    pub percentage: Option<f64>,
    pub real_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipStat {
    pub ship_name: String,
    pub ship_xws: String,
    pub faction: String,
    pub faction_xws: String,
    pub win_rate: WinRate,
    #[serde(deserialize_with = "lenient_f64")]
    pub popularity: f64,
    #[serde(deserialize_with = "lenient_u32")]
    pub games: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotStat {
    pub name: String,
    pub xws: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub popularity: f64,
    #[serde(deserialize_with = "lenient_u32")]
    pub wins: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub games: u32,
    pub faction: String,
    pub ship: String,
    pub ship_xws: String,
    pub ship_icon: String,
    pub image: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub cost: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub loadout: i64,
    pub win_rate: WinRate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeStat {
    pub name: String,
    pub xws: String,
    #[serde(rename = "type")]
    pub upgrade_type: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub popularity: f64,
    #[serde(deserialize_with = "lenient_u32")]
    pub wins: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub games: u32,
    pub image: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub cost: i64,
    pub win_rate: WinRate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentRow {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub name: String,
    pub date: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub players: u32,
    pub format_label: String,
    pub badge_l1: String,
    pub badge_l2: String,
    pub platform_label: String,
    pub location: String,
    pub url: String,
}

/// Dashboard payload of `/api/meta-snapshot`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaSnapshot {
    pub factions: Vec<FactionStat>,
    pub faction_distribution: Vec<FactionStat>,
    pub ships: Vec<ShipStat>,
    pub lists: Vec<ListEntry>,
    pub pilots: Vec<PilotStat>,
    pub upgrades: Vec<UpgradeStat>,
    pub last_sync: String,
    pub date_range: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub total_tournaments: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub total_players: u32,
}

/// Envelope shared by every list/search endpoint. `page` is zero-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    #[serde(deserialize_with = "lenient_u32")]
    pub total: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub page: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub size: u32,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 0,
            size: 0,
        }
    }
}

impl<T> PaginatedResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ship_stat_defaults_missing_and_malformed_fields() {
        let ship: ShipStat = serde_json::from_str(
            r#"{"ship_name":"TIE/ln Fighter","ship_xws":"tielnfighter","popularity":"12","games":null,"win_rate":"NA"}"#,
        )
        .expect("parse ship");

        assert_eq!(ship.ship_name, "TIE/ln Fighter");
        assert_eq!(ship.popularity, 12.0);
        assert_eq!(ship.games, 0);
        assert_eq!(ship.faction_xws, "");
        assert_eq!(ship.win_rate, WinRate::NotApplicable);
    }

    #[test]
    fn upgrade_stat_reads_type_field() {
        let upgrade: UpgradeStat =
            serde_json::from_str(r#"{"name":"Proton Torpedoes","type":"Torpedo","popularity":7}"#)
                .expect("parse upgrade");
        assert_eq!(upgrade.upgrade_type, "Torpedo");
        assert_eq!(upgrade.popularity, 7.0);
    }

    #[test]
    fn paginated_lists_parse_nested_pilots() {
        let page: PaginatedResponse<ListEntry> = serde_json::from_str(
            r#"{
                "items": [{
                    "faction": "Galactic Empire",
                    "faction_key": "galacticempire",
                    "points": 49,
                    "count": 6,
                    "games": 21,
                    "win_rate": 57.1,
                    "total_loadout": 30,
                    "pilots": [{
                        "name": "Darth Vader",
                        "ship_name": "TIE Advanced x1",
                        "ship_icon": "tieadvancedx1",
                        "points": 6,
                        "loadout": 12,
                        "upgrades": [{"name": "Marksmanship", "slot": "talent", "points": 1}]
                    }]
                }],
                "total": 41,
                "page": 2,
                "size": 20
            }"#,
        )
        .expect("parse page");

        assert_eq!(page.total, 41);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 1);
        let list = &page.items[0];
        assert_eq!(list.count, 6);
        assert_eq!(list.win_rate, WinRate::Numeric(57.1));
        assert_eq!(list.pilots[0].upgrades[0].slot, "talent");
    }

    #[test]
    fn empty_envelope_defaults_to_zeroes() {
        let page: PaginatedResponse<TournamentRow> = serde_json::from_str("{}").expect("parse");
        assert!(page.is_empty());
        assert_eq!((page.total, page.page, page.size), (0, 0, 0));
    }
}
