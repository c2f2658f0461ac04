use leptos::prelude::*;

use m3tacron_shared::icons::UPGRADE_TYPES;
use m3tacron_shared::options::{faction_options, initiative_options, ship_options, upgrade_type_options};
use m3tacron_shared::query::{CardFilters, CardTab, toggle};
use m3tacron_shared::{BrowserState, DataSource, FilterOption, PilotStat, UpgradeStat};

use crate::api::{use_cards, use_meta};
use crate::browser::{BrowserLayout, CARD_GRID, FilterColumn, PagedResults};
use crate::rows::{PilotCard, UpgradeCard};
use crate::widgets::{
    Accordion, CheckList, FilterHeader, PageTitle, SearchInput, SearchableAccordion,
    SegmentedControl,
};

/// Upgrade slots seen in the snapshot, or every known slot before it loads.
fn upgrade_choices(upgrades: Option<&[UpgradeStat]>) -> Vec<FilterOption> {
    match upgrades.map(upgrade_type_options) {
        Some(options) if !options.is_empty() => options,
        _ => UPGRADE_TYPES
            .iter()
            .map(|(key, label)| FilterOption::new(*key, *label))
            .collect(),
    }
}

#[component]
pub fn Cards() -> impl IntoView {
    let state = RwSignal::new(BrowserState::<CardFilters>::default());
    // Card data is XWA-only.
    let meta = use_meta(|| DataSource::Xwa);
    let cards = use_cards(move || state.with(|s| (s.filters().tab, s.filters().to_query(s.page()))));

    let tab = Memo::new(move |_| state.with(|s| s.filters().tab));
    let search = Signal::derive(move || state.with(|s| s.filters().search_text.clone()));
    let selected_factions = Signal::derive(move || state.with(|s| s.filters().factions.clone()));
    let selected_ships = Signal::derive(move || state.with(|s| s.filters().ships.clone()));
    let selected_initiatives = Signal::derive(move || {
        state.with(|s| s.filters().initiatives.iter().map(u8::to_string).collect::<Vec<_>>())
    });
    let selected_types = Signal::derive(move || state.with(|s| s.filters().upgrade_types.clone()));
    let chassis = Signal::derive(move || {
        let factions = selected_factions.get();
        meta.data
            .with(|m| m.as_ref().map(|m| ship_options(&m.ships, &factions)))
            .unwrap_or_default()
    });
    let slot_options = Signal::derive(move || {
        meta.data.with(|m| upgrade_choices(m.as_ref().map(|m| m.upgrades.as_slice())))
    });

    let pilot_filters = move || {
        view! {
            <Accordion title="FACTIONS">
                <CheckList
                    options=Signal::derive(faction_options)
                    selected=selected_factions
                    on_toggle=Callback::new(move |faction: String| state.update(|s| s.edit(|f| f.toggle_faction(&faction))))
                />
            </Accordion>
            <SearchableAccordion
                title="CHASSIS"
                options=chassis
                selected=selected_ships
                on_toggle=Callback::new(move |ship: String| state.update(|s| s.edit(|f| toggle(&mut f.ships, ship))))
            />
            <Accordion title="INITIATIVE" default_open=false>
                <CheckList
                    options=Signal::derive(initiative_options)
                    selected=selected_initiatives
                    on_toggle=Callback::new(move |raw: String| {
                        if let Ok(i) = raw.parse::<u8>() {
                            state.update(|s| s.edit(|f| toggle(&mut f.initiatives, i)));
                        }
                    })
                />
            </Accordion>
        }
    };

    let upgrade_filters = move || {
        view! {
            <SearchableAccordion
                title="UPGRADE TYPE"
                options=slot_options
                selected=selected_types
                on_toggle=Callback::new(move |slot: String| state.update(|s| s.edit(|f| toggle(&mut f.upgrade_types, slot))))
            />
        }
    };

    view! {
        <PageTitle title="CARDS" />
        <div style="margin-bottom: 20px;">
            <SegmentedControl
                options=vec![
                    (CardTab::Pilots.label(), CardTab::Pilots.as_str()),
                    (CardTab::Upgrades.label(), CardTab::Upgrades.as_str()),
                ]
                value=Signal::derive(move || tab.get().as_str().to_string())
                on_change=Callback::new(move |raw: String| {
                    let next = if raw == CardTab::Upgrades.as_str() { CardTab::Upgrades } else { CardTab::Pilots };
                    if next != tab.get_untracked() {
                        state.update(|s| s.edit(|f| f.tab = next));
                    }
                })
            />
        </div>
        <BrowserLayout>
            <FilterColumn>
                <FilterHeader
                    title="FILTERS"
                    on_reset=Callback::new(move |_| state.update(|s| {
                        let tab = s.filters().tab;
                        s.reset(CardFilters { tab, ..CardFilters::default() });
                    }))
                />
                <SearchInput
                    placeholder="Search cards..."
                    value=search
                    on_commit=Callback::new(move |text: String| state.update(|s| s.edit(|f| f.search_text = text)))
                />
                {move || match tab.get() {
                    CardTab::Pilots => pilot_filters().into_any(),
                    CardTab::Upgrades => upgrade_filters().into_any(),
                }}
            </FilterColumn>
            {move || match tab.get() {
                CardTab::Pilots => view! {
                    <PagedResults
                        query=cards.pilots
                        noun="PILOTS"
                        container=CARD_GRID
                        render=|pilot: PilotStat| view! { <PilotCard pilot=pilot /> }
                        on_page=Callback::new(move |p: u32| state.update(|s| s.set_page(p)))
                    />
                }
                .into_any(),
                CardTab::Upgrades => view! {
                    <PagedResults
                        query=cards.upgrades
                        noun="UPGRADES"
                        container=CARD_GRID
                        render=|upgrade: UpgradeStat| view! { <UpgradeCard upgrade=upgrade /> }
                        on_page=Callback::new(move |p: u32| state.update(|s| s.set_page(p)))
                    />
                }
                .into_any(),
            }}
        </BrowserLayout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_choices_fall_back_to_known_slots() {
        assert_eq!(upgrade_choices(None).len(), UPGRADE_TYPES.len());
        assert_eq!(upgrade_choices(Some(&[][..])).len(), UPGRADE_TYPES.len());

        let seen = [UpgradeStat {
            upgrade_type: "Talent".into(),
            ..UpgradeStat::default()
        }];
        assert_eq!(upgrade_choices(Some(&seen[..])), vec![FilterOption::new("talent", "Talent")]);
    }
}
