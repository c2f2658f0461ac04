use leptos::prelude::*;

use m3tacron_shared::options::{faction_options, ship_options};
use m3tacron_shared::query::{ShipFilters, ShipSortMetric, toggle};
use m3tacron_shared::{BrowserState, DataSource, ShipStat, SortDirection};

use crate::api::{use_meta, use_ships};
use crate::app::CurrentView;
use crate::browser::{BrowserLayout, CARD_GRID, FilterColumn, PagedResults};
use crate::rows::ShipCard;
use crate::widgets::{
    Accordion, CheckList, FilterHeader, PageTitle, SearchableAccordion, SortControls,
};

#[component]
pub fn Ships() -> impl IntoView {
    let CurrentView(view_params) = expect_context();
    let source = Memo::new(move |_| view_params.with(|v| v.source));
    let state = RwSignal::new(BrowserState::<ShipFilters>::default());

    Effect::new(move |previous: Option<DataSource>| {
        let current = source.get();
        if previous.is_some_and(|p| p != current) {
            state.update(|s| s.set_page(0));
        }
        current
    });

    let meta = use_meta(move || source.get());
    let query = use_ships(move || state.with(|s| s.filters().to_query(source.get(), s.page())));

    let selected_factions = Signal::derive(move || state.with(|s| s.filters().factions.clone()));
    let selected_ships = Signal::derive(move || state.with(|s| s.filters().ships.clone()));
    let chassis = Signal::derive(move || {
        let factions = selected_factions.get();
        meta.data
            .with(|m| m.as_ref().map(|m| ship_options(&m.ships, &factions)))
            .unwrap_or_default()
    });
    let metric = Signal::derive(move || state.with(|s| s.filters().sort_metric));
    let direction = Signal::derive(move || state.with(|s| s.filters().sort_direction));

    view! {
        <PageTitle title="SHIPS" />
        <BrowserLayout>
            <FilterColumn>
                <FilterHeader
                    title="FILTERS"
                    on_reset=Callback::new(move |_| state.update(|s| s.reset(ShipFilters::default())))
                />
                <SortControls
                    metric=metric
                    direction=direction
                    on_metric=Callback::new(move |m: ShipSortMetric| state.update(|s| s.edit(|f| f.sort_metric = m)))
                    on_direction=Callback::new(move |d: SortDirection| state.update(|s| s.edit(|f| f.sort_direction = d)))
                />
                <Accordion title="FACTIONS">
                    <CheckList
                        options=Signal::derive(faction_options)
                        selected=selected_factions
                        on_toggle=Callback::new(move |faction: String| state.update(|s| s.edit(|f| toggle(&mut f.factions, faction))))
                    />
                </Accordion>
                <SearchableAccordion
                    title="CHASSIS"
                    options=chassis
                    selected=selected_ships
                    on_toggle=Callback::new(move |ship: String| state.update(|s| s.edit(|f| toggle(&mut f.ships, ship))))
                />
            </FilterColumn>
            <PagedResults
                query=query
                noun="SHIPS"
                container=CARD_GRID
                render=|ship: ShipStat| view! { <ShipCard ship=ship /> }
                on_page=Callback::new(move |p: u32| state.update(|s| s.set_page(p)))
            />
        </BrowserLayout>
    }
}
