use leptos::prelude::*;

use m3tacron_shared::{BrowserState, TournamentRow};
use m3tacron_shared::FilterOption;
use m3tacron_shared::options::TOURNAMENT_FORMATS;
use m3tacron_shared::query::{TournamentFilters, toggle};

use crate::api::use_tournaments;
use crate::browser::{BrowserLayout, FilterColumn, PagedResults};
use crate::rows::TournamentItem;
use crate::widgets::{Accordion, CheckList, FilterHeader, PageTitle, SearchInput};

fn format_options() -> Vec<FilterOption> {
    TOURNAMENT_FORMATS
        .iter()
        .map(|(label, id)| FilterOption::new(id.to_string(), *label))
        .collect()
}

#[component]
pub fn Tournaments() -> impl IntoView {
    let state = RwSignal::new(BrowserState::<TournamentFilters>::default());
    let query = use_tournaments(move || state.with(|s| s.filters().to_query(s.page())));

    let search = Signal::derive(move || state.with(|s| s.filters().search.clone()));
    let selected_formats = Signal::derive(move || {
        state.with(|s| s.filters().formats.iter().map(i32::to_string).collect::<Vec<_>>())
    });

    view! {
        <PageTitle title="TOURNAMENTS" />
        <BrowserLayout>
            <FilterColumn>
                <FilterHeader
                    title="FILTERS"
                    on_reset=Callback::new(move |_| state.update(|s| s.reset(TournamentFilters::default())))
                />
                <SearchInput
                    placeholder="Search tournaments..."
                    value=search
                    on_commit=Callback::new(move |text: String| state.update(|s| s.edit(|f| f.search = text)))
                />
                <Accordion title="FORMAT">
                    <CheckList
                        options=Signal::derive(format_options)
                        selected=selected_formats
                        on_toggle=Callback::new(move |value: String| {
                            if let Ok(id) = value.parse::<i32>() {
                                state.update(|s| s.edit(|f| toggle(&mut f.formats, id)));
                            }
                        })
                    />
                </Accordion>
            </FilterColumn>
            <PagedResults
                query=query
                noun="TOURNAMENTS"
                render=|t: TournamentRow| view! { <TournamentItem tournament=t /> }
                on_page=Callback::new(move |p: u32| state.update(|s| s.set_page(p)))
            />
        </BrowserLayout>
    }
}
