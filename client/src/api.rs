//! Data hooks over the `/api` endpoints.
//!
//! Responses are cached by URL for the lifetime of the page, concurrent
//! requests for one URL share a single fetch, and every hook keeps showing
//! its previous data while a new request is in flight.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use m3tacron_shared::query::{CardTab, QueryParams, SQUADRON_PAGE_SIZE};
use m3tacron_shared::{
    DataSource, ListEntry, MetaSnapshot, PaginatedResponse, PilotStat, ShipStat, TournamentRow,
    UpgradeStat,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(String),
}

type Body = Rc<String>;
type InFlight = Shared<LocalBoxFuture<'static, Result<Body, FetchError>>>;

thread_local! {
    static RESPONSE_CACHE: RefCell<HashMap<String, Body>> = RefCell::new(HashMap::new());
    static IN_FLIGHT: RefCell<HashMap<String, InFlight>> = RefCell::new(HashMap::new());
}

pub fn api_url(path: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        format!("/api/{path}")
    } else {
        format!("/api/{path}?{params}")
    }
}

pub fn meta_url(source: DataSource) -> String {
    let mut params = QueryParams::new();
    params.set("data_source", source);
    api_url("meta-snapshot", &params)
}

pub fn cards_url(tab: CardTab, params: &QueryParams) -> String {
    api_url(&format!("cards/{}", tab.as_str()), params)
}

async fn fetch_text(url: &str) -> Result<String, FetchError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }

    resp.text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))
}

fn cached_body(url: &str) -> Option<Body> {
    RESPONSE_CACHE.with(|cache| cache.borrow().get(url).cloned())
}

/// Fetch `url`, joining an identical request that is already in flight.
async fn request(url: String) -> Result<Body, FetchError> {
    request_with(url, |target| async move { fetch_text(&target).await }).await
}

/// Coalescing core of [`request`]. `fetch` only runs when no request for
/// `url` is pending; every caller receives the same result.
async fn request_with<F, Fut>(url: String, fetch: F) -> Result<Body, FetchError>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<String, FetchError>> + 'static,
{
    let shared = IN_FLIGHT.with(|slot| {
        slot.borrow_mut()
            .entry(url.clone())
            .or_insert_with(|| {
                let pending = fetch(url.clone());
                async move { pending.await.map(Rc::new) }
                    .boxed_local()
                    .shared()
            })
            .clone()
    });

    let result = shared.clone().await;

    IN_FLIGHT.with(|slot| {
        let mut map = slot.borrow_mut();
        // A newer request for the same URL may already have replaced this one.
        if map.get(&url).is_some_and(|current| current.ptr_eq(&shared)) {
            map.remove(&url);
        }
    });
    if let Ok(body) = &result {
        RESPONSE_CACHE.with(|cache| cache.borrow_mut().insert(url, body.clone()));
    }
    result
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Monotonic request counter of one hook. Only the latest request may
/// write its response.
#[derive(Debug, Default, Clone, Copy)]
struct Generations {
    latest: u64,
}

impl Generations {
    fn begin(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    fn accepts(&self, generation: u64) -> bool {
        generation == self.latest
    }
}

/// Reactive result of a data hook.
///
/// `data_key` names the request `data` was loaded for, which differs from
/// the current request while a new one is in flight. `error` only ever
/// belongs to the current request.
pub struct QueryState<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub data_key: RwSignal<Option<String>>,
    pub error: RwSignal<Option<FetchError>>,
    pub validating: RwSignal<bool>,
}

impl<T: Send + Sync + 'static> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryState<T> {}

impl<T: Send + Sync + 'static> QueryState<T> {
    fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            data_key: RwSignal::new(None),
            error: RwSignal::new(None),
            validating: RwSignal::new(false),
        }
    }

    /// True only while there is nothing at all to show.
    pub fn is_loading(&self) -> bool {
        self.data.with(Option::is_none) && self.error.with(Option::is_none)
    }

    pub fn failed(&self) -> bool {
        self.error.with(Option::is_some)
    }

    /// A new request owns no error yet; the previous data stays visible.
    fn start_request(&self) {
        self.error.set(None);
    }

    fn show(&self, key: String, value: T) {
        self.data.set(Some(value));
        self.data_key.set(Some(key));
        self.error.set(None);
    }
}

/// Subscribe to the JSON resource named by `key`. `None` keeps the hook idle.
///
/// Each key change starts a new generation; a response that resolves after
/// a newer generation has started is dropped, so late responses can never
/// overwrite fresher data.
pub fn use_query<T>(key: impl Fn() -> Option<String> + 'static) -> QueryState<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    use_query_with(key, decode::<T>)
}

/// [`use_query`] with a custom body decoder.
pub fn use_query_with<T>(
    key: impl Fn() -> Option<String> + 'static,
    decode_body: fn(&str) -> Result<T, FetchError>,
) -> QueryState<T>
where
    T: Send + Sync + 'static,
{
    let state = QueryState::<T>::new();
    let generations = StoredValue::new(Generations::default());

    Effect::new(move || {
        let mut generation = 0;
        generations.update_value(|g| generation = g.begin());
        state.start_request();

        let Some(url) = key() else {
            state.validating.set(false);
            return;
        };

        if let Some(body) = cached_body(&url) {
            if let Ok(value) = decode_body(&body) {
                state.show(url.clone(), value);
            }
        }
        state.validating.set(true);

        spawn_local(async move {
            let result = request(url.clone()).await.and_then(|body| decode_body(&body));
            if !generations.with_value(|g| g.accepts(generation)) {
                return;
            }
            match result {
                Ok(value) => state.show(url, value),
                Err(e) => {
                    web_sys::console::warn_1(&format!("Fetch {url} failed: {e}").into());
                    state.error.set(Some(e));
                }
            }
            state.validating.set(false);
        });
    });

    state
}

pub fn use_meta(source: impl Fn() -> DataSource + 'static) -> QueryState<MetaSnapshot> {
    use_query(move || Some(meta_url(source())))
}

pub fn use_tournaments(
    params: impl Fn() -> QueryParams + 'static,
) -> QueryState<PaginatedResponse<TournamentRow>> {
    use_query(move || Some(api_url("tournaments", &params())))
}

pub fn use_lists(
    params: impl Fn() -> QueryParams + 'static,
) -> QueryState<PaginatedResponse<ListEntry>> {
    use_query(move || Some(api_url("lists", &params())))
}

pub fn use_ships(
    params: impl Fn() -> QueryParams + 'static,
) -> QueryState<PaginatedResponse<ShipStat>> {
    use_query(move || Some(api_url("ships", &params())))
}

/// Pilot and upgrade pages have different item types; only the hook for the
/// active tab fetches.
#[derive(Clone, Copy)]
pub struct CardQueries {
    pub pilots: QueryState<PaginatedResponse<PilotStat>>,
    pub upgrades: QueryState<PaginatedResponse<UpgradeStat>>,
}

pub fn use_cards(request: impl Fn() -> (CardTab, QueryParams) + Clone + 'static) -> CardQueries {
    let pilot_request = request.clone();
    CardQueries {
        pilots: use_query(move || {
            let (tab, params) = pilot_request();
            (tab == CardTab::Pilots).then(|| cards_url(tab, &params))
        }),
        upgrades: use_query(move || {
            let (tab, params) = request();
            (tab == CardTab::Upgrades).then(|| cards_url(tab, &params))
        }),
    }
}

/// Squadron aggregates have no fixed envelope: a bare array or an object
/// with an `items` array are both accepted.
fn loose_page(value: Value) -> PaginatedResponse<Value> {
    match value {
        Value::Array(items) => {
            let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
            PaginatedResponse {
                items,
                total,
                page: 0,
                size: total,
            }
        }
        Value::Object(mut map) => {
            let items = match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            let number = |key: &str| {
                map.get(key)
                    .and_then(Value::as_u64)
                    .and_then(|n| u32::try_from(n).ok())
            };
            let total = number("total").unwrap_or(u32::try_from(items.len()).unwrap_or(u32::MAX));
            PaginatedResponse {
                total,
                page: number("page").unwrap_or(0),
                size: number("size").unwrap_or(SQUADRON_PAGE_SIZE),
                items,
            }
        }
        _ => PaginatedResponse::default(),
    }
}

fn decode_squadron_page(body: &str) -> Result<PaginatedResponse<Value>, FetchError> {
    decode::<Value>(body).map(loose_page)
}

pub fn use_squadrons(
    params: impl Fn() -> QueryParams + 'static,
) -> QueryState<PaginatedResponse<Value>> {
    use_query_with(move || Some(api_url("squadrons", &params())), decode_squadron_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use m3tacron_shared::query::{CardFilters, ShipFilters, TournamentFilters};

    #[test]
    fn meta_url_carries_source() {
        assert_eq!(meta_url(DataSource::Legacy), "/api/meta-snapshot?data_source=legacy");
    }

    #[test]
    fn browser_urls_append_serialized_filters() {
        let ships = ShipFilters::default().to_query(DataSource::Xwa, 2);
        assert_eq!(
            api_url("ships", &ships),
            "/api/ships?page=2&size=20&data_source=xwa&sort_metric=Popularity&sort_direction=desc"
        );

        let cards = CardFilters::default();
        assert_eq!(
            cards_url(CardTab::Upgrades, &cards.to_query(0)),
            "/api/cards/upgrades?page=0&size=36"
        );

        let tournaments = TournamentFilters {
            search: "open cup".into(),
            formats: vec![17],
        };
        assert_eq!(
            api_url("tournaments", &tournaments.to_query(0)),
            "/api/tournaments?page=0&size=15&search=open+cup&format=17"
        );
    }

    #[test]
    fn empty_params_drop_question_mark() {
        assert_eq!(api_url("squadrons", &QueryParams::new()), "/api/squadrons");
    }

    #[test]
    fn superseded_responses_are_dropped() {
        let mut generations = Generations::default();
        let first = generations.begin();
        let second = generations.begin();

        // The first request resolves after the second one started.
        assert!(!generations.accepts(first));
        assert!(generations.accepts(second));

        let third = generations.begin();
        assert!(!generations.accepts(second));
        assert!(generations.accepts(third));
    }

    #[test]
    fn new_request_clears_previous_error_but_keeps_data() {
        let state = QueryState::<u32>::new();
        state.show("/api/ships?page=0".into(), 7);
        state.error.set(Some(FetchError::Status(502)));
        assert!(state.failed());

        state.start_request();
        assert!(!state.failed());
        assert!(!state.is_loading());
        assert_eq!(state.data.get_untracked(), Some(7));
        assert_eq!(state.data_key.get_untracked().as_deref(), Some("/api/ships?page=0"));
    }

    #[test]
    fn concurrent_requests_share_one_fetch() {
        use futures::channel::oneshot;
        use std::cell::Cell;

        let url = "/api/ships?page=0".to_string();
        let calls = Rc::new(Cell::new(0));
        let (tx, rx) = oneshot::channel::<String>();

        let first = request_with(url.clone(), {
            let calls = Rc::clone(&calls);
            move |_| {
                calls.set(calls.get() + 1);
                async move { rx.await.map_err(|e| FetchError::Network(e.to_string())) }
            }
        });
        let second = request_with(url.clone(), {
            let calls = Rc::clone(&calls);
            move |_| {
                calls.set(calls.get() + 1);
                async { Err(FetchError::Network("second fetch".into())) }
            }
        });

        let (a, b) = futures::executor::block_on(async {
            futures::join!(first, async {
                let _ = tx.send("{\"total\":3}".to_string());
                second.await
            })
        });

        assert_eq!(calls.get(), 1);
        assert_eq!(a.as_deref().map(String::as_str), Ok("{\"total\":3}"));
        assert_eq!(a, b);
        assert_eq!(cached_body(&url).as_deref().map(String::as_str), Some("{\"total\":3}"));
        assert!(IN_FLIGHT.with(|slot| slot.borrow().is_empty()));
    }

    #[test]
    fn failed_fetches_are_not_cached() {
        let url = "/api/lists?page=0".to_string();
        let result = futures::executor::block_on(request_with(url.clone(), |_| async {
            Err(FetchError::Status(503))
        }));
        assert_eq!(result, Err(FetchError::Status(503)));
        assert!(cached_body(&url).is_none());
    }

    #[test]
    fn squadron_pages_accept_loose_envelopes() {
        let bare = decode_squadron_page(r#"[{"faction":"rebelalliance"},{"faction":"scumandvillainy"}]"#)
            .expect("bare array");
        assert_eq!(bare.items.len(), 2);
        assert_eq!(bare.total, 2);
        assert_eq!(bare.page, 0);

        let wrapped = decode_squadron_page(r#"{"items":[{"faction":"galacticempire"}],"total":41,"page":2}"#)
            .expect("envelope");
        assert_eq!(wrapped.items.len(), 1);
        assert_eq!(wrapped.total, 41);
        assert_eq!(wrapped.page, 2);
        assert_eq!(wrapped.size, SQUADRON_PAGE_SIZE);

        let other = decode_squadron_page(r#"{"squadrons":"unavailable"}"#).expect("object");
        assert!(other.items.is_empty());
        assert_eq!(other.total, 0);

        assert!(matches!(decode_squadron_page("<html>"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn decode_errors_are_typed() {
        let err = decode::<PaginatedResponse<ShipStat>>("not json").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(FetchError::Status(503).to_string(), "HTTP 503");
    }
}
