//! Squadron aggregates. The backend shape is loose, so rows are read field
//! by field from raw JSON and missing fields fall back to empty values.

use leptos::prelude::*;
use serde_json::Value;

use m3tacron_shared::options::faction_options;
use m3tacron_shared::query::{SquadronFilters, toggle};
use m3tacron_shared::{BadgeTone, BrowserState, WinRate, faction_color, faction_label};

use crate::api::use_squadrons;
use crate::browser::{BrowserLayout, FilterColumn, PagedResults};
use crate::colors::{BORDER, MONO, PANEL, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::icons::{FactionIcon, ShipIcon};
use crate::widgets::{Accordion, Badge, CheckList, FilterHeader, PageTitle};

#[derive(Debug, Clone, PartialEq)]
struct SquadronShip {
    name: String,
    xws: String,
    count: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct SquadronSummary {
    faction: String,
    ships: Vec<SquadronShip>,
    count: u64,
    games: u64,
    win_rate: WinRate,
}

fn text(value: &Value, key: &str) -> String {
    value.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn number(value: &Value, key: &str) -> u64 {
    value
        .get(key)
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64)))
        .unwrap_or(0)
}

impl SquadronShip {
    fn caption(&self) -> String {
        if self.count > 1 {
            format!("{}x {}", self.count, self.name)
        } else {
            self.name.clone()
        }
    }
}

impl SquadronSummary {
    fn from_json(value: &Value) -> Self {
        let ships = value
            .get("ships")
            .and_then(Value::as_array)
            .map(|ships| {
                ships
                    .iter()
                    .map(|s| SquadronShip {
                        name: text(s, "name"),
                        xws: text(s, "xws"),
                        count: number(s, "count").max(1),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let win_rate = value
            .get("win_rate")
            .and_then(|v| serde_json::from_value::<WinRate>(v.clone()).ok())
            .unwrap_or_default();

        Self {
            faction: text(value, "faction"),
            ships,
            count: number(value, "count"),
            games: number(value, "games"),
            win_rate,
        }
    }
}

#[component]
fn SquadronRow(squadron: Value) -> impl IntoView {
    let summary = SquadronSummary::from_json(&squadron);
    let color = faction_color(&summary.faction);

    view! {
        <div style=format!("display: flex; align-items: center; gap: 16px; flex-wrap: wrap; padding: 12px 16px; background: {PANEL}; border: 1px solid {BORDER}; border-left: 4px solid {color}; border-radius: 6px;")>
            <div style="display: flex; align-items: center; gap: 8px; min-width: 180px;">
                <FactionIcon faction=summary.faction.clone() size="1.4rem" />
                <span style=format!("font-size: 0.75rem; font-weight: 700; text-transform: uppercase; color: {TEXT_PRIMARY};")>
                    {faction_label(&summary.faction)}
                </span>
            </div>
            <div style="display: flex; flex-wrap: wrap; gap: 12px; flex: 1;">
                {summary
                    .ships
                    .into_iter()
                    .map(|ship| {
                        let caption = ship.caption();
                        view! {
                            <div title=ship.name style="display: flex; align-items: center; gap: 4px;">
                                <ShipIcon xws=ship.xws size="1.6rem" />
                                <span style=format!("font-size: 0.8rem; color: {TEXT_SECONDARY}; font-family: {MONO};")>
                                    {caption}
                                </span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <div style="display: flex; gap: 8px;">
                <Badge tone=BadgeTone::Gray>{format!("{} LISTS", summary.count)}</Badge>
                <Badge tone=BadgeTone::Gray>{format!("{} GAMES", summary.games)}</Badge>
                <Badge tone=summary.win_rate.tone()>{format!("{} WR", summary.win_rate.label())}</Badge>
            </div>
        </div>
    }
}

#[component]
pub fn Squadrons() -> impl IntoView {
    let state = RwSignal::new(BrowserState::<SquadronFilters>::default());
    let query = use_squadrons(move || state.with(|s| s.filters().to_query(s.page())));
    let selected_factions = Signal::derive(move || state.with(|s| s.filters().factions.clone()));

    view! {
        <PageTitle title="SQUADRONS" />
        <BrowserLayout>
            <FilterColumn>
                <FilterHeader
                    title="FILTERS"
                    on_reset=Callback::new(move |_| state.update(|s| s.reset(SquadronFilters::default())))
                />
                <Accordion title="FACTIONS">
                    <CheckList
                        options=Signal::derive(faction_options)
                        selected=selected_factions
                        on_toggle=Callback::new(move |faction: String| state.update(|s| s.edit(|f| toggle(&mut f.factions, faction))))
                    />
                </Accordion>
            </FilterColumn>
            <PagedResults
                query=query
                noun="SQUADRONS"
                render=|squadron: Value| view! { <SquadronRow squadron=squadron /> }
                on_page=Callback::new(move |p: u32| state.update(|s| s.set_page(p)))
            />
        </BrowserLayout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_known_fields() {
        let summary = SquadronSummary::from_json(&json!({
            "signature": "xwing|xwing|ywing",
            "faction": "rebelalliance",
            "ships": [
                {"name": "T-65 X-wing", "xws": "t65xwing", "count": 2},
                {"name": "BTL-A4 Y-wing", "xws": "btla4ywing"}
            ],
            "count": 12,
            "games": 40,
            "wins": 22,
            "win_rate": 55.0
        }));
        assert_eq!(summary.faction, "rebelalliance");
        assert_eq!(summary.ships.len(), 2);
        assert_eq!(summary.ships[0].count, 2);
        assert_eq!(summary.ships[1].count, 1);
        assert_eq!(summary.count, 12);
        assert_eq!(summary.games, 40);
        assert_eq!(summary.win_rate, WinRate::Numeric(55.0));
    }

    #[test]
    fn ship_caption_counts_duplicates() {
        let ship = |count| SquadronShip {
            name: "T-65 X-wing".into(),
            xws: "t65xwing".into(),
            count,
        };
        assert_eq!(ship(1).caption(), "T-65 X-wing");
        assert_eq!(ship(3).caption(), "3x T-65 X-wing");
    }

    #[test]
    fn tolerates_missing_and_malformed_fields() {
        let summary = SquadronSummary::from_json(&json!({"ships": "nope", "games": "many", "win_rate": "NA"}));
        assert!(summary.ships.is_empty());
        assert_eq!(summary.games, 0);
        assert_eq!(summary.win_rate, WinRate::NotApplicable);
        assert_eq!(summary.faction, "");
    }
}
