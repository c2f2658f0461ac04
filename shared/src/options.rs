//! Choices offered by the browser filter accordions.

use std::collections::BTreeMap;

use crate::factions::Faction;
use crate::stats::{ShipStat, UpgradeStat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// `(label, format id)` as understood by the tournaments endpoint.
pub const TOURNAMENT_FORMATS: &[(&str, i32)] = &[
    ("XWA Standard", 17),
    ("XWA Extended", 18),
    ("Legacy Standard", 13),
    ("Legacy Wild Space", 15),
    ("Legacy Epic", 16),
    ("AMG Standard", 0),
];

pub fn faction_options() -> Vec<FilterOption> {
    Faction::ALL
        .iter()
        .map(|f| FilterOption::new(f.xws(), f.label()))
        .collect()
}

/// Ship chassis present in the snapshot, restricted to the selected factions
/// when any are selected. One entry per ship xws, sorted by label.
pub fn ship_options(ships: &[ShipStat], factions: &[String]) -> Vec<FilterOption> {
    let mut unique: BTreeMap<&str, &str> = BTreeMap::new();
    for ship in ships {
        if ship.ship_xws.is_empty() {
            continue;
        }
        if !factions.is_empty() && !factions.iter().any(|f| *f == ship.faction_xws) {
            continue;
        }
        unique.entry(&ship.ship_xws).or_insert(&ship.ship_name);
    }

    let mut options: Vec<FilterOption> = unique
        .into_iter()
        .map(|(xws, name)| {
            let label = if name.is_empty() { xws } else { name };
            FilterOption::new(xws, label)
        })
        .collect();
    options.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
    options
}

pub fn upgrade_type_options(upgrades: &[UpgradeStat]) -> Vec<FilterOption> {
    let mut types: Vec<&str> = upgrades
        .iter()
        .map(|u| u.upgrade_type.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    types.sort_unstable();
    types.dedup();
    types
        .into_iter()
        .map(|t| FilterOption::new(t.to_lowercase(), t))
        .collect()
}

pub fn initiative_options() -> Vec<FilterOption> {
    (0..=7u8)
        .map(|i| FilterOption::new(i.to_string(), i.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(xws: &str, name: &str, faction: &str) -> ShipStat {
        ShipStat {
            ship_xws: xws.to_string(),
            ship_name: name.to_string(),
            faction_xws: faction.to_string(),
            ..ShipStat::default()
        }
    }

    #[test]
    fn ships_are_deduplicated_and_filtered_by_faction() {
        let ships = vec![
            ship("t65xwing", "T-65 X-wing", "rebelalliance"),
            ship("tielnfighter", "TIE/ln Fighter", "galacticempire"),
            ship("tielnfighter", "TIE/ln Fighter", "rebelalliance"),
            ship("", "Nameless", "rebelalliance"),
            ship("arc170starfighter", "ARC-170", "rebelalliance"),
        ];

        let all = ship_options(&ships, &[]);
        let labels: Vec<&str> = all.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["ARC-170", "T-65 X-wing", "TIE/ln Fighter"]);

        let empire = ship_options(&ships, &["galacticempire".to_string()]);
        assert_eq!(empire, vec![FilterOption::new("tielnfighter", "TIE/ln Fighter")]);
    }

    #[test]
    fn upgrade_types_are_distinct_and_lowercased() {
        let upgrades: Vec<UpgradeStat> = ["Talent", "Crew", "", "Talent"]
            .iter()
            .map(|t| UpgradeStat {
                upgrade_type: t.to_string(),
                ..UpgradeStat::default()
            })
            .collect();
        assert_eq!(
            upgrade_type_options(&upgrades),
            vec![
                FilterOption::new("crew", "Crew"),
                FilterOption::new("talent", "Talent"),
            ]
        );
    }

    #[test]
    fn static_option_tables() {
        assert_eq!(initiative_options().len(), 8);
        assert_eq!(faction_options().len(), 7);
        assert!(TOURNAMENT_FORMATS.contains(&("XWA Standard", 17)));
    }
}
