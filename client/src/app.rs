use std::cell::RefCell;

use gloo_storage::Storage;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use m3tacron_shared::{DataSource, Route, ViewParams};

use crate::cards::Cards;
use crate::colors::{BG, BORDER, MONO, SANS, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::dashboard::Dashboard;
use crate::lists::Lists;
use crate::ships::Ships;
use crate::sidebar::{MobileHeader, Sidebar};
use crate::squadrons::Squadrons;
use crate::tournaments::Tournaments;
use crate::widgets::SegmentedControl;

const SETTINGS_KEY: &str = "m3tacron_settings";
const MOBILE_BREAKPOINT_PX: f64 = 768.0;

struct PopStateBinding {
    window: web_sys::Window,
    _handler: Closure<dyn Fn(web_sys::PopStateEvent)>,
}

struct ResizeBinding {
    window: web_sys::Window,
    _handler: Closure<dyn Fn()>,
}

thread_local! {
    static POPSTATE_BINDING: RefCell<Option<PopStateBinding>> = const { RefCell::new(None) };
    static RESIZE_BINDING: RefCell<Option<ResizeBinding>> = const { RefCell::new(None) };
}

/// Route and data source shared by every page. Only this state lives in the
/// URL; browser filters stay local to their page.
#[derive(Clone, Copy)]
pub(crate) struct CurrentView(pub RwSignal<ViewParams>);
#[derive(Clone, Copy)]
pub(crate) struct SidebarCollapsed(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct IsMobile(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct DrawerOpen(pub RwSignal<bool>);

#[derive(Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct Settings {
    sidebar_collapsed: bool,
}

fn window_is_mobile() -> bool {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .is_some_and(|w| w < MOBILE_BREAKPOINT_PX)
}

fn location_view() -> ViewParams {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return ViewParams::default();
    };
    let pathname = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    ViewParams::from_location(&pathname, &search)
}

fn location_url() -> Option<String> {
    let location = web_sys::window()?.location();
    Some(format!("{}{}", location.pathname().ok()?, location.search().ok()?))
}

pub(crate) fn navigate(view: RwSignal<ViewParams>, route: Route) {
    if view.with_untracked(|v| v.route) == route {
        return;
    }
    view.update(|v| *v = v.with_route(route));
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

fn set_source(view: RwSignal<ViewParams>, source: DataSource) {
    if view.with_untracked(|v| v.source) == source {
        return;
    }
    web_sys::console::info_1(&format!("Data source -> {source}").into());
    view.update(|v| *v = v.with_source(source));
}

fn bind_popstate(view: RwSignal<ViewParams>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    POPSTATE_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old
                .window
                .remove_event_listener_with_callback("popstate", old._handler.as_ref().unchecked_ref());
        }
    });

    let handler = Closure::<dyn Fn(web_sys::PopStateEvent)>::new(move |_: web_sys::PopStateEvent| {
        let next = location_view();
        if view.get_untracked() != next {
            view.set(next);
        }
    });

    if window
        .add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())
        .is_ok()
    {
        POPSTATE_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(PopStateBinding {
                window: window.clone(),
                _handler: handler,
            });
        });
    }
}

fn bind_resize(is_mobile: RwSignal<bool>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    RESIZE_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old
                .window
                .remove_event_listener_with_callback("resize", old._handler.as_ref().unchecked_ref());
        }
    });

    let handler = Closure::<dyn Fn()>::new(move || {
        let mobile = window_is_mobile();
        if is_mobile.get_untracked() != mobile {
            is_mobile.set(mobile);
        }
    });

    if window
        .add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref())
        .is_ok()
    {
        RESIZE_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(ResizeBinding {
                window: window.clone(),
                _handler: handler,
            });
        });
    }
}

/// XWA / Legacy switch for the pages that read the data source.
#[component]
fn SourceToggle() -> impl IntoView {
    let CurrentView(view_params) = expect_context();
    let options = DataSource::ALL
        .iter()
        .map(|s| (s.label(), s.as_str()))
        .collect::<Vec<_>>();

    view! {
        <div style="display: flex; align-items: center; gap: 12px;">
            <span style=format!("font-size: 0.72rem; font-family: {MONO}; letter-spacing: 0.12em; color: {TEXT_SECONDARY};")>
                "DATA SOURCE"
            </span>
            <SegmentedControl
                options=options
                value=Signal::derive(move || view_params.with(|v| v.source.as_str().to_string()))
                on_change=Callback::new(move |raw: String| {
                    if let Some(source) = DataSource::parse(&raw) {
                        set_source(view_params, source);
                    }
                })
            />
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let saved: Settings = gloo_storage::LocalStorage::get(SETTINGS_KEY).unwrap_or_default();
    let view_params: RwSignal<ViewParams> = RwSignal::new(location_view());
    let sidebar_collapsed: RwSignal<bool> = RwSignal::new(saved.sidebar_collapsed);
    let is_mobile: RwSignal<bool> = RwSignal::new(window_is_mobile());
    let drawer_open: RwSignal<bool> = RwSignal::new(false);

    provide_context(CurrentView(view_params));
    provide_context(SidebarCollapsed(sidebar_collapsed));
    provide_context(IsMobile(is_mobile));
    provide_context(DrawerOpen(drawer_open));

    // Persist UI settings
    Effect::new(move || {
        let settings = Settings {
            sidebar_collapsed: sidebar_collapsed.get(),
        };
        let _ = gloo_storage::LocalStorage::set(SETTINGS_KEY, &settings);
    });

    // Mirror the view into the address bar. Popstate updates arrive with the
    // URL already current, so they never push a duplicate entry.
    Effect::new(move || {
        let url = view_params.get().to_url();
        if location_url().as_deref() == Some(url.as_str()) {
            return;
        }
        let pushed = web_sys::window()
            .and_then(|w| w.history().ok())
            .map(|h| h.push_state_with_url(&JsValue::NULL, "", Some(&url)));
        if let Some(Err(e)) = pushed {
            web_sys::console::warn_1(&format!("pushState to {url} failed: {e:?}").into());
        }
    });

    bind_popstate(view_params);
    bind_resize(is_mobile);

    let route = Memo::new(move |_| view_params.with(|v| v.route));

    view! {
        <div style=format!("display: flex; min-height: 100vh; background: {BG}; color: {TEXT_PRIMARY}; font-family: {SANS};")>
            <Sidebar />
            <div style="flex: 1; min-width: 0; display: flex; flex-direction: column;">
                <MobileHeader />
                <Show when=move || route.get().uses_source()>
                    <div style=format!("display: flex; justify-content: flex-end; padding: 12px 24px; border-bottom: 1px solid {BORDER};")>
                        <SourceToggle />
                    </div>
                </Show>
                <main style="flex: 1; padding: 24px; max-width: 1400px; width: 100%; margin: 0 auto;">
                    {move || match route.get() {
                        Route::Dashboard => view! { <Dashboard /> }.into_any(),
                        Route::Tournaments => view! { <Tournaments /> }.into_any(),
                        Route::Squadrons => view! { <Squadrons /> }.into_any(),
                        Route::Lists => view! { <Lists /> }.into_any(),
                        Route::Ships => view! { <Ships /> }.into_any(),
                        Route::Cards => view! { <Cards /> }.into_any(),
                    }}
                </main>
            </div>
        </div>
    }
}
