use leptos::prelude::*;

use m3tacron_shared::Route;

use crate::app::{CurrentView, DrawerOpen, IsMobile, SidebarCollapsed, navigate};
use crate::colors::{ACCENT, BORDER, MONO, PANEL, SANS, TEXT_PRIMARY, TEXT_SECONDARY};

const EXPANDED_WIDTH: &str = "220px";
const COLLAPSED_WIDTH: &str = "56px";

/// Short glyph shown for a route when the sidebar is collapsed.
fn route_glyph(route: Route) -> &'static str {
    match route {
        Route::Dashboard => "\u{25A3}",
        Route::Tournaments => "\u{2691}",
        Route::Squadrons => "\u{25C8}",
        Route::Lists => "\u{2630}",
        Route::Ships => "\u{2708}",
        Route::Cards => "\u{25A4}",
    }
}

#[component]
fn NavLinks(#[prop(into)] compact: Signal<bool>) -> impl IntoView {
    let CurrentView(view_params) = expect_context();
    let DrawerOpen(drawer_open) = expect_context();

    Route::ALL
        .into_iter()
        .map(|route| {
            let active = move || view_params.with(|v| v.route == route);
            view! {
                <a
                    href=move || view_params.get().with_route(route).to_url()
                    title=route.nav_label()
                    style=move || format!(
                        "display: flex; align-items: center; gap: 12px; padding: 10px 16px; text-decoration: none; font-family: {MONO}; font-size: 0.8rem; font-weight: 700; letter-spacing: 0.12em; border-left: 3px solid {}; color: {}; background: {};",
                        if active() { ACCENT } else { "transparent" },
                        if active() { TEXT_PRIMARY } else { TEXT_SECONDARY },
                        if active() { "rgba(79,172,254,0.08)" } else { "transparent" },
                    )
                    on:click=move |e| {
                        e.prevent_default();
                        navigate(view_params, route);
                        drawer_open.set(false);
                    }
                >
                    <span style="width: 20px; text-align: center; font-size: 1rem;">{route_glyph(route)}</span>
                    <span style:display=move || if compact.get() { "none" } else { "inline" }>
                        {route.nav_label()}
                    </span>
                </a>
            }
        })
        .collect_view()
}

#[component]
fn Brand(#[prop(into)] compact: Signal<bool>) -> impl IntoView {
    view! {
        <div style=format!("padding: 18px 16px; font-family: {SANS}; font-weight: 800; font-size: 1.1rem; letter-spacing: 0.08em; color: {TEXT_PRIMARY}; white-space: nowrap; overflow: hidden;")>
            {move || if compact.get() { "M3" } else { "M3TACRON" }}
        </div>
    }
}

/// Desktop navigation column. The collapsed state is persisted with the
/// rest of the UI settings.
#[component]
pub fn Sidebar() -> impl IntoView {
    let SidebarCollapsed(collapsed) = expect_context();
    let IsMobile(is_mobile) = expect_context();
    let compact = Signal::derive(move || collapsed.get());

    view! {
        <nav
            style=move || format!(
                "flex-shrink: 0; height: 100vh; position: sticky; top: 0; display: flex; flex-direction: column; background: {PANEL}; border-right: 1px solid {BORDER}; transition: width 0.2s ease; overflow: hidden; width: {};",
                if collapsed.get() { COLLAPSED_WIDTH } else { EXPANDED_WIDTH },
            )
            style:display=move || if is_mobile.get() { "none" } else { "flex" }
        >
            <Brand compact=compact />
            <div style="display: flex; flex-direction: column; flex: 1;">
                <NavLinks compact=compact />
            </div>
            <button
                title=move || if collapsed.get() { "Expand sidebar" } else { "Collapse sidebar" }
                style=format!("margin: 12px; padding: 6px; background: none; border: 1px solid {BORDER}; border-radius: 6px; color: {TEXT_SECONDARY}; font-family: {MONO}; cursor: pointer;")
                on:click=move |_| collapsed.update(|c| *c = !*c)
            >
                {move || if collapsed.get() { "\u{00BB}" } else { "\u{00AB}" }}
            </button>
        </nav>
    }
}

/// Top bar with a menu button that opens the navigation drawer on narrow
/// screens.
#[component]
pub fn MobileHeader() -> impl IntoView {
    let IsMobile(is_mobile) = expect_context();
    let DrawerOpen(drawer_open) = expect_context();

    view! {
        <Show when=move || is_mobile.get()>
            <header style=format!("position: sticky; top: 0; z-index: 20; display: flex; align-items: center; justify-content: space-between; padding: 10px 16px; background: {PANEL}; border-bottom: 1px solid {BORDER};")>
                <span style=format!("font-family: {SANS}; font-weight: 800; letter-spacing: 0.08em; color: {TEXT_PRIMARY};")>
                    "M3TACRON"
                </span>
                <button
                    aria-label="Open navigation"
                    style=format!("background: none; border: 1px solid {BORDER}; border-radius: 6px; color: {TEXT_PRIMARY}; font-size: 1.1rem; padding: 4px 10px; cursor: pointer;")
                    on:click=move |_| drawer_open.update(|o| *o = !*o)
                >
                    "\u{2630}"
                </button>
            </header>
            <Show when=move || drawer_open.get()>
                <div
                    style="position: fixed; inset: 0; z-index: 30; background: rgba(0,0,0,0.55);"
                    on:click=move |_| drawer_open.set(false)
                >
                    <nav
                        style=format!("width: 240px; height: 100%; background: {PANEL}; border-right: 1px solid {BORDER}; display: flex; flex-direction: column;")
                        on:click=|e| e.stop_propagation()
                    >
                        <Brand compact=false />
                        <NavLinks compact=false />
                    </nav>
                </div>
            </Show>
        </Show>
    }
}
