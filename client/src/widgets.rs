use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use m3tacron_shared::{BadgeTone, FilterOption, PageWindow, SortDirection, SortMetric};

use crate::colors::{
    ACCENT, BG, BORDER, MONO, PANEL, SANS, TEXT_PRIMARY, TEXT_SECONDARY, tone_colors,
};

const SEARCH_DEBOUNCE_MS: u32 = 300;

pub fn panel_style() -> String {
    format!(
        "background: {PANEL}; border: 1px solid {BORDER}; border-radius: 8px; padding: 16px; box-shadow: inset 0 1px 0 rgba(255,255,255,0.03);"
    )
}

fn input_value(e: &leptos::ev::Event) -> Option<String> {
    let target = e.target()?;
    let input = target.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    Some(input.value())
}

#[component]
pub fn Badge(tone: BadgeTone, children: Children) -> impl IntoView {
    let (text, border, background) = tone_colors(tone);
    view! {
        <span style=format!(
            "padding: 2px 8px; font-size: 10px; font-weight: 700; font-family: {MONO}; text-transform: uppercase; letter-spacing: 0.08em; border-radius: 999px; border: 1px solid {border}; background: {background}; color: {text}; white-space: nowrap;"
        )>
            {children()}
        </span>
    }
}

#[component]
pub fn StatCard(
    label: &'static str,
    #[prop(into)] value: String,
    #[prop(optional)] subtext: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div style=format!("{} display: flex; flex-direction: column; gap: 4px;", panel_style())>
            <span style=format!("font-size: 0.72rem; font-weight: 700; letter-spacing: 0.1em; color: {TEXT_SECONDARY}; font-family: {MONO};")>
                {label}
            </span>
            <span style=format!("font-size: 2rem; font-weight: 700; color: {TEXT_PRIMARY}; font-family: {SANS};")>
                {value}
            </span>
            {subtext.map(|s| view! {
                <span style=format!("font-size: 0.72rem; color: {TEXT_SECONDARY}; font-family: {MONO};")>{s}</span>
            })}
        </div>
    }
}

#[component]
pub fn Accordion(
    title: &'static str,
    #[prop(default = true)] default_open: bool,
    children: Children,
) -> impl IntoView {
    let open = RwSignal::new(default_open);
    view! {
        <div style=format!("border-bottom: 1px solid {BORDER}; padding: 12px 0;")>
            <button
                style=format!("display: flex; width: 100%; align-items: center; justify-content: space-between; background: none; border: none; padding: 0; cursor: pointer; color: {TEXT_PRIMARY}; font-family: {MONO}; font-size: 0.85rem; font-weight: 700; letter-spacing: 0.08em;")
                on:click=move |_| open.update(|v| *v = !*v)
            >
                {title}
                <span style=format!("color: {TEXT_SECONDARY};")>
                    {move || if open.get() { "\u{25BE}" } else { "\u{25B8}" }}
                </span>
            </button>
            <div
                style="margin-top: 12px; padding-bottom: 8px;"
                style:display=move || if open.get() { "block" } else { "none" }
            >
                {children()}
            </div>
        </div>
    }
}

/// Multi-select checkbox column.
#[component]
pub fn CheckList(
    options: Signal<Vec<FilterOption>>,
    selected: Signal<Vec<String>>,
    on_toggle: Callback<String>,
) -> impl IntoView {
    view! {
        <div style="display: flex; flex-direction: column; gap: 8px; max-height: 240px; overflow-y: auto; padding-right: 4px;">
            <Show
                when=move || options.with(|o| !o.is_empty())
                fallback=|| view! {
                    <div style=format!("font-size: 0.75rem; color: {TEXT_SECONDARY}; font-style: italic; padding: 8px 0;")>
                        "No items found."
                    </div>
                }
            >
                <For
                    each=move || options.get()
                    key=|opt| opt.value.clone()
                    children=move |opt| {
                        let value = opt.value.clone();
                        let checked_value = opt.value.clone();
                        let checked = move || selected.with(|s| s.contains(&checked_value));
                        view! {
                            <div
                                style="display: flex; align-items: center; justify-content: space-between; gap: 8px; cursor: pointer;"
                                on:click=move |_| on_toggle.run(value.clone())
                            >
                                <span
                                    title=opt.label.clone()
                                    style=format!("font-size: 0.85rem; font-family: {MONO}; color: {TEXT_SECONDARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; user-select: none;")
                                >
                                    {opt.label.clone()}
                                </span>
                                <span style=move || {
                                    let on = checked();
                                    format!(
                                        "flex-shrink: 0; width: 16px; height: 16px; border-radius: 3px; border: 1px solid {}; background: {}; transition: background 0.15s;",
                                        if on { ACCENT } else { BORDER },
                                        if on { ACCENT } else { "transparent" },
                                    )
                                } />
                            </div>
                        }
                    }
                />
            </Show>
        </div>
    }
}

/// Accordion whose options can be narrowed by a local text search.
#[component]
pub fn SearchableAccordion(
    title: &'static str,
    options: Signal<Vec<FilterOption>>,
    selected: Signal<Vec<String>>,
    on_toggle: Callback<String>,
    #[prop(default = true)] default_open: bool,
) -> impl IntoView {
    let search = RwSignal::new(String::new());
    let filtered = Signal::derive(move || {
        let needle = search.get().to_lowercase();
        options.with(|opts| {
            opts.iter()
                .filter(|o| o.label.to_lowercase().contains(&needle))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <Accordion title=title default_open=default_open>
            <input
                type="text"
                placeholder="Search..."
                style=format!("width: 100%; margin-bottom: 10px; padding: 6px 10px; background: {BG}; border: 1px solid {BORDER}; border-radius: 6px; color: {TEXT_PRIMARY}; font-family: {MONO}; font-size: 0.85rem; outline: none;")
                prop:value=move || search.get()
                on:input=move |e| {
                    if let Some(v) = input_value(&e) {
                        search.set(v);
                    }
                }
            />
            <CheckList options=filtered selected=selected on_toggle=on_toggle />
        </Accordion>
    }
}

#[component]
pub fn SegmentedControl(
    options: Vec<(&'static str, &'static str)>,
    value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div style="display: inline-flex; background: rgba(255,255,255,0.05); border-radius: 6px; padding: 4px;">
            {options
                .into_iter()
                .map(|(label, option)| {
                    let active = move || value.with(|v| v == option);
                    view! {
                        <button
                            style=move || format!(
                                "padding: 4px 14px; font-size: 0.85rem; border: none; border-radius: 4px; cursor: pointer; transition: background 0.15s, color 0.15s; background: {}; color: {};",
                                if active() { "rgba(255,255,255,0.15)" } else { "transparent" },
                                if active() { TEXT_PRIMARY } else { TEXT_SECONDARY },
                            )
                            on:click=move |_| on_change.run(option.to_string())
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Text input that commits its value after the user stops typing.
#[component]
pub fn SearchInput(
    placeholder: &'static str,
    value: Signal<String>,
    on_commit: Callback<String>,
) -> impl IntoView {
    let text = RwSignal::new(value.get_untracked());
    let pending = Rc::new(Cell::new(false));
    let debounce_timeout = Rc::new(RefCell::new(None::<Timeout>));

    // Follow external resets, but never clobber text that is still pending.
    Effect::new({
        let pending = Rc::clone(&pending);
        move || {
            let external = value.get();
            if !pending.get() && external != text.get_untracked() {
                text.set(external);
            }
        }
    });

    let on_input = move |e: leptos::ev::Event| {
        let Some(next) = input_value(&e) else {
            return;
        };
        text.set(next.clone());
        pending.set(true);

        if let Some(timeout) = debounce_timeout.borrow_mut().take() {
            timeout.cancel();
        }
        let pending = Rc::clone(&pending);
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            pending.set(false);
            on_commit.run(next);
        });
        *debounce_timeout.borrow_mut() = Some(timeout);
    };

    view! {
        <input
            type="text"
            placeholder=placeholder
            style=format!("width: 100%; padding: 10px 12px; background: {BG}; border: 1px solid {BORDER}; border-radius: 6px; color: {TEXT_PRIMARY}; font-family: {MONO}; font-size: 0.85rem; outline: none;")
            prop:value=move || text.get()
            on:input=on_input
        />
    }
}

/// Title row of a filter column with a reset button.
#[component]
pub fn FilterHeader(title: &'static str, on_reset: Callback<()>) -> impl IntoView {
    view! {
        <div style="display: flex; align-items: center; justify-content: space-between;">
            <h2 style=format!("margin: 0; font-size: 0.85rem; font-weight: 700; letter-spacing: 0.08em; color: {TEXT_PRIMARY}; font-family: {MONO};")>
                {title}
            </h2>
            <button
                title="Reset Filters"
                style=format!("background: none; border: none; cursor: pointer; color: {TEXT_SECONDARY}; font-size: 1rem; padding: 2px 6px; border-radius: 4px;")
                on:click=move |_| on_reset.run(())
            >
                "\u{21BA}"
            </button>
        </div>
    }
}

#[component]
pub fn PageTitle(title: &'static str) -> impl IntoView {
    view! {
        <div style=format!("border-bottom: 1px solid {BORDER}; padding-bottom: 20px; margin-bottom: 20px;")>
            <h1 style=format!("margin: 0; font-size: 28px; font-weight: 700; font-family: {SANS}; color: {TEXT_PRIMARY};")>
                {title}
            </h1>
        </div>
    }
}

#[component]
pub fn LoadingLine() -> impl IntoView {
    view! {
        <div style=format!("color: {TEXT_SECONDARY}; font-family: {MONO}; letter-spacing: 0.15em;")>"LOADING..."</div>
    }
}

#[component]
pub fn ResultCount(count: u32, noun: &'static str) -> impl IntoView {
    view! {
        <div style=format!("margin-bottom: 16px; font-size: 0.85rem; font-family: {MONO}; color: {TEXT_SECONDARY}; letter-spacing: 0.15em;")>
            {format!("{count} {noun} FOUND")}
        </div>
    }
}

#[component]
pub fn EmptyState(noun: &'static str) -> impl IntoView {
    view! {
        <div style=format!("{} display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 12px; padding: 64px 16px;", panel_style())>
            <span style=format!("color: {TEXT_SECONDARY}; font-family: {MONO}; font-weight: 700; letter-spacing: 0.15em;")>
                {format!("0 {noun} FOUND")}
            </span>
            <span style=format!("font-size: 0.85rem; color: {TEXT_SECONDARY};")>
                {format!("No {} match your current filters.", noun.to_lowercase())}
            </span>
        </div>
    }
}

/// Previous/next controls with a page-jump box. Renders nothing for a
/// single page of results.
#[component]
pub fn Pagination(
    page: Signal<u32>,
    total: Signal<u32>,
    size: Signal<u32>,
    on_page: Callback<u32>,
) -> impl IntoView {
    let window = Memo::new(move |_| PageWindow::new(page.get(), total.get(), size.get()));
    let jump_text = RwSignal::new(String::new());

    let nav_button = move |enabled: bool| {
        format!(
            "padding: 6px 12px; border-radius: 4px; background: {PANEL}; border: 1px solid {BORDER}; color: {TEXT_SECONDARY}; font-family: {MONO}; cursor: {}; opacity: {};",
            if enabled { "pointer" } else { "not-allowed" },
            if enabled { "1" } else { "0.5" },
        )
    };

    let jump = move || {
        let Some(w) = window.get_untracked() else {
            return;
        };
        if let Some(target) = w.jump_target(&jump_text.get_untracked()) {
            jump_text.set(String::new());
            if target != w.page() {
                on_page.run(target);
            }
        }
    };

    move || {
        window.get().map(|w| {
            view! {
                <div style="display: flex; align-items: center; justify-content: center; gap: 16px; margin-top: 32px; padding: 16px 0; flex-wrap: wrap;">
                    <button
                        aria-label="Previous Page"
                        disabled=!w.has_prev()
                        style=nav_button(w.has_prev())
                        on:click=move |_| {
                            if let Some(p) = w.prev() {
                                on_page.run(p);
                            }
                        }
                    >
                        "\u{2039}"
                    </button>
                    <span style=format!("font-size: 0.85rem; font-family: {MONO}; color: {TEXT_SECONDARY}; letter-spacing: 0.15em;")>
                        {w.label()}
                    </span>
                    <button
                        aria-label="Next Page"
                        disabled=!w.has_next()
                        style=nav_button(w.has_next())
                        on:click=move |_| {
                            if let Some(p) = w.next() {
                                on_page.run(p);
                            }
                        }
                    >
                        "\u{203A}"
                    </button>
                    <input
                        type="text"
                        inputmode="numeric"
                        placeholder="GO TO"
                        style=format!("width: 64px; padding: 5px 8px; background: {BG}; border: 1px solid {BORDER}; border-radius: 4px; color: {TEXT_PRIMARY}; font-family: {MONO}; font-size: 0.8rem; outline: none;")
                        prop:value=move || jump_text.get()
                        on:input=move |e| {
                            if let Some(v) = input_value(&e) {
                                jump_text.set(v);
                            }
                        }
                        on:keydown=move |e: web_sys::KeyboardEvent| {
                            if e.key() == "Enter" {
                                jump();
                            }
                        }
                    />
                </div>
            }
        })
    }
}

/// Server-side sort metric picker plus a direction toggle.
#[component]
pub fn SortControls<M>(
    metric: Signal<M>,
    direction: Signal<SortDirection>,
    on_metric: Callback<M>,
    on_direction: Callback<SortDirection>,
) -> impl IntoView
where
    M: SortMetric + Send + Sync,
{
    let options = M::ALL.iter().map(|m| (m.as_str(), m.as_str())).collect::<Vec<_>>();
    let value = Signal::derive(move || metric.get().as_str().to_string());

    view! {
        <div style="display: flex; flex-direction: column; gap: 10px;">
            <span style=format!("font-size: 0.75rem; font-family: {MONO}; letter-spacing: 0.1em; color: {TEXT_SECONDARY};")>
                "SORT BY"
            </span>
            <div style="display: flex; flex-wrap: wrap; align-items: center; gap: 8px;">
                <SegmentedControl
                    options=options
                    value=value
                    on_change=Callback::new(move |raw: String| {
                        if let Some(m) = M::parse(&raw) {
                            on_metric.run(m);
                        }
                    })
                />
                <button
                    title="Toggle sort direction"
                    style=format!("padding: 6px 10px; background: {BG}; border: 1px solid {BORDER}; border-radius: 4px; color: {TEXT_PRIMARY}; font-family: {MONO}; font-size: 0.75rem; cursor: pointer;")
                    on:click=move |_| on_direction.run(direction.get_untracked().toggled())
                >
                    {move || match direction.get() {
                        SortDirection::Desc => "DESC \u{2193}",
                        SortDirection::Asc => "ASC \u{2191}",
                    }}
                </button>
            </div>
        </div>
    }
}

/// Inclusive numeric range clamped to `0..=bound`. Commits on change
/// (blur or Enter), never mid-keystroke.
#[component]
pub fn RangeField(
    label: &'static str,
    low: Signal<u32>,
    high: Signal<u32>,
    bound: Signal<u32>,
    on_change: Callback<(u32, u32)>,
) -> impl IntoView {
    let input_style = format!(
        "width: 72px; padding: 6px 8px; background: {BG}; border: 1px solid {BORDER}; border-radius: 4px; color: {TEXT_PRIMARY}; font-family: {MONO}; font-size: 0.8rem; outline: none;"
    );
    let parse = move |e: &leptos::ev::Event| {
        input_value(e)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .map(|v| v.min(bound.get_untracked()))
    };

    view! {
        <div style="display: flex; flex-direction: column; gap: 8px;">
            <span style=format!("font-size: 0.75rem; font-family: {MONO}; letter-spacing: 0.1em; color: {TEXT_SECONDARY};")>
                {label}
            </span>
            <div style="display: flex; align-items: center; gap: 8px;">
                <input
                    type="number"
                    min="0"
                    style=input_style.clone()
                    prop:value=move || low.get().to_string()
                    on:change=move |e| {
                        if let Some(v) = parse(&e) {
                            on_change.run((v.min(high.get_untracked()), high.get_untracked()));
                        }
                    }
                />
                <span style=format!("color: {TEXT_SECONDARY};")>"\u{2013}"</span>
                <input
                    type="number"
                    min="0"
                    style=input_style
                    prop:value=move || high.get().to_string()
                    on:change=move |e| {
                        if let Some(v) = parse(&e) {
                            on_change.run((low.get_untracked(), v.max(low.get_untracked())));
                        }
                    }
                />
            </div>
        </div>
    }
}

#[component]
pub fn NumberField(
    label: &'static str,
    value: Signal<u32>,
    on_change: Callback<u32>,
) -> impl IntoView {
    view! {
        <div style="display: flex; align-items: center; justify-content: space-between; gap: 8px;">
            <span style=format!("font-size: 0.75rem; font-family: {MONO}; letter-spacing: 0.1em; color: {TEXT_SECONDARY};")>
                {label}
            </span>
            <input
                type="number"
                min="0"
                style=format!("width: 72px; padding: 6px 8px; background: {BG}; border: 1px solid {BORDER}; border-radius: 4px; color: {TEXT_PRIMARY}; font-family: {MONO}; font-size: 0.8rem; outline: none;")
                prop:value=move || value.get().to_string()
                on:change=move |e| {
                    if let Some(v) = input_value(&e).and_then(|raw| raw.trim().parse::<u32>().ok()) {
                        on_change.run(v);
                    }
                }
            />
        </div>
    }
}
