//! Shared two-column layout of the browser pages: filters on the left,
//! a paginated result list on the right.

use leptos::prelude::*;

use m3tacron_shared::PaginatedResponse;

use crate::api::QueryState;
use crate::colors::{MONO, TEXT_SECONDARY};
use crate::widgets::{EmptyState, LoadingLine, Pagination, ResultCount, panel_style};

pub const LIST_STACK: &str = "display: flex; flex-direction: column; gap: 16px;";
pub const CARD_GRID: &str =
    "display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 16px;";

#[component]
pub fn BrowserLayout(children: Children) -> impl IntoView {
    view! {
        <div style="display: flex; flex-wrap: wrap; gap: 24px; align-items: flex-start; width: 100%;">
            {children()}
        </div>
    }
}

#[component]
pub fn FilterColumn(children: Children) -> impl IntoView {
    view! {
        <aside style=format!("{} flex: 0 0 280px; max-width: 100%; display: flex; flex-direction: column; gap: 16px;", panel_style())>
            {children()}
        </aside>
    }
}

/// Result count, items and pagination for one paginated query.
///
/// Previous results stay on screen while the next page loads; the loading
/// line only shows before anything has arrived, and a failed request
/// replaces the results with an error line.
#[component]
pub fn PagedResults<T, F, V>(
    query: QueryState<PaginatedResponse<T>>,
    noun: &'static str,
    #[prop(default = LIST_STACK)] container: &'static str,
    render: F,
    on_page: Callback<u32>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let field = move |pick: fn(&PaginatedResponse<T>) -> u32| {
        Signal::derive(move || query.data.with(|d| d.as_ref().map(pick).unwrap_or(0)))
    };
    let page = field(|r| r.page);
    let total = field(|r| r.total);
    let size = field(|r| r.size);

    let body = move || {
        if query.is_loading() {
            return view! { <LoadingLine /> }.into_any();
        }
        let loaded = query
            .data
            .with(|d| d.as_ref().map(|r| (r.total, r.items.clone())));
        let Some((count, items)) = loaded.filter(|_| !query.failed()) else {
            return view! {
                <div style=format!("color: {TEXT_SECONDARY}; font-family: {MONO}; letter-spacing: 0.15em;")>
                    {format!("FAILED TO LOAD {noun}")}
                </div>
            }
            .into_any();
        };
        if items.is_empty() {
            return view! { <EmptyState noun=noun /> }.into_any();
        }
        view! {
            <ResultCount count=count noun=noun />
            <div style=container>{items.into_iter().map(&render).collect_view()}</div>
        }
        .into_any()
    };

    view! {
        <section
            style=move || format!(
                "flex: 1 1 480px; min-width: 0; transition: opacity 0.15s; opacity: {};",
                if query.validating.get() && !query.is_loading() { "0.6" } else { "1" },
            )
        >
            {body}
            <Pagination page=page total=total size=size on_page=on_page />
        </section>
    }
}
