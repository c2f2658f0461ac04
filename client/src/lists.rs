use leptos::prelude::*;

use m3tacron_shared::options::faction_options;
use m3tacron_shared::query::{LOADOUT_MAX, ListFilters, ListSortMetric, toggle};
use m3tacron_shared::{BrowserState, DataSource, ListEntry, SortDirection};

use crate::api::use_lists;
use crate::app::CurrentView;
use crate::browser::{BrowserLayout, FilterColumn, PagedResults};
use crate::rows::ListRow;
use crate::widgets::{
    Accordion, CheckList, FilterHeader, NumberField, PageTitle, RangeField, SortControls,
};

#[component]
pub fn Lists() -> impl IntoView {
    let CurrentView(view_params) = expect_context();
    let source = Memo::new(move |_| view_params.with(|v| v.source));
    let state = RwSignal::new(BrowserState::new(ListFilters::for_source(source.get_untracked())));

    // Range bounds differ per format, so a source switch starts from scratch.
    Effect::new(move |previous: Option<DataSource>| {
        let current = source.get();
        if previous.is_some_and(|p| p != current) {
            state.update(|s| s.reset(ListFilters::for_source(current)));
        }
        current
    });

    let query = use_lists(move || state.with(|s| s.filters().to_query(source.get(), s.page())));

    let filter = move |pick: fn(&ListFilters) -> u32| Signal::derive(move || state.with(|s| pick(s.filters())));
    let points_min = filter(|f| f.points_min);
    let points_max = filter(|f| f.points_max);
    let loadout_min = filter(|f| f.loadout_min);
    let loadout_max = filter(|f| f.loadout_max);
    let min_games = filter(|f| f.min_games);
    let selected_factions = Signal::derive(move || state.with(|s| s.filters().factions.clone()));
    let metric = Signal::derive(move || state.with(|s| s.filters().sort_metric));
    let direction = Signal::derive(move || state.with(|s| s.filters().sort_direction));

    view! {
        <PageTitle title="SQUAD LISTS" />
        <BrowserLayout>
            <FilterColumn>
                <FilterHeader
                    title="FILTERS"
                    on_reset=Callback::new(move |_| state.update(|s| s.reset(ListFilters::for_source(source.get_untracked()))))
                />
                <SortControls
                    metric=metric
                    direction=direction
                    on_metric=Callback::new(move |m: ListSortMetric| state.update(|s| s.edit(|f| f.sort_metric = m)))
                    on_direction=Callback::new(move |d: SortDirection| state.update(|s| s.edit(|f| f.sort_direction = d)))
                />
                <Accordion title="FACTIONS">
                    <CheckList
                        options=Signal::derive(faction_options)
                        selected=selected_factions
                        on_toggle=Callback::new(move |faction: String| state.update(|s| s.edit(|f| toggle(&mut f.factions, faction))))
                    />
                </Accordion>
                <Accordion title="RANGES">
                    <div style="display: flex; flex-direction: column; gap: 16px;">
                        <RangeField
                            label="POINTS"
                            low=points_min
                            high=points_max
                            bound=Signal::derive(move || source.get().points_max())
                            on_change=Callback::new(move |(lo, hi): (u32, u32)| state.update(|s| s.edit(|f| {
                                f.points_min = lo;
                                f.points_max = hi;
                            })))
                        />
                        <Show when=move || source.get().supports_loadout()>
                            <RangeField
                                label="LOADOUT"
                                low=loadout_min
                                high=loadout_max
                                bound=Signal::derive(|| LOADOUT_MAX)
                                on_change=Callback::new(move |(lo, hi): (u32, u32)| state.update(|s| s.edit(|f| {
                                    f.loadout_min = lo;
                                    f.loadout_max = hi;
                                })))
                            />
                        </Show>
                        <NumberField
                            label="MIN GAMES"
                            value=min_games
                            on_change=Callback::new(move |n: u32| state.update(|s| s.edit(|f| f.min_games = n)))
                        />
                    </div>
                </Accordion>
            </FilterColumn>
            <PagedResults
                query=query
                noun="LISTS"
                render=|list: ListEntry| view! { <ListRow list=list /> }
                on_page=Callback::new(move |p: u32| state.update(|s| s.set_page(p)))
            />
        </BrowserLayout>
    }
}
