//! Browser filter state and its query-string form.
//!
//! Each browser page keeps a [`BrowserState`] holding its filter set and a
//! zero-based page index. The filter sets know how to serialize themselves
//! into the exact query keys the backend list endpoints expect.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const LIST_PAGE_SIZE: u32 = 20;
pub const SHIP_PAGE_SIZE: u32 = 20;
pub const CARD_PAGE_SIZE: u32 = 36;
pub const TOURNAMENT_PAGE_SIZE: u32 = 15;
pub const SQUADRON_PAGE_SIZE: u32 = 20;

pub const LOADOUT_MAX: u32 = 50;

/// Ordered query parameters. Multi-valued keys are repeated, never joined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string, with or without the leading `?`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self {
            pairs: url::form_urlencoded::parse(raw.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// Replace every value of `key` with a single value.
    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Add one more value for `key`, keeping existing ones.
    pub fn append(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn append_all<I, V>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self.append(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `application/x-www-form-urlencoded` rendering (spaces become `+`).
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Game-format variant whose statistics are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Xwa,
    Legacy,
}

impl DataSource {
    pub const ALL: [DataSource; 2] = [DataSource::Xwa, DataSource::Legacy];

    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Xwa => "xwa",
            DataSource::Legacy => "legacy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DataSource::Xwa => "XWA",
            DataSource::Legacy => "Legacy",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "xwa" => Some(DataSource::Xwa),
            "legacy" => Some(DataSource::Legacy),
            _ => None,
        }
    }

    /// Upper bound of the squad points range for this format.
    pub fn points_max(self) -> u32 {
        match self {
            DataSource::Xwa => 50,
            DataSource::Legacy => 200,
        }
    }

    /// Loadout values only exist in the XWA points system.
    pub fn supports_loadout(self) -> bool {
        matches!(self, DataSource::Xwa)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Desc => "desc",
            SortDirection::Asc => "asc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Desc => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
        }
    }
}

/// Server-side sort metric; the wire value is also the display label.
pub trait SortMetric: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSortMetric {
    #[default]
    Games,
    WinRate,
    PointsCost,
    TotalLoadout,
}

impl SortMetric for ListSortMetric {
    const ALL: &'static [Self] = &[
        ListSortMetric::Games,
        ListSortMetric::WinRate,
        ListSortMetric::PointsCost,
        ListSortMetric::TotalLoadout,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ListSortMetric::Games => "Games",
            ListSortMetric::WinRate => "Win Rate",
            ListSortMetric::PointsCost => "Points Cost",
            ListSortMetric::TotalLoadout => "Total Loadout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShipSortMetric {
    #[default]
    Popularity,
    Games,
    WinRate,
}

impl SortMetric for ShipSortMetric {
    const ALL: &'static [Self] = &[
        ShipSortMetric::Popularity,
        ShipSortMetric::Games,
        ShipSortMetric::WinRate,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ShipSortMetric::Popularity => "Popularity",
            ShipSortMetric::Games => "Games",
            ShipSortMetric::WinRate => "Win Rate",
        }
    }
}

/// Toggle `value` in a multi-select, keeping selection order.
pub fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}

fn push_paging(params: &mut QueryParams, page: u32, size: u32) {
    params.set("page", page).set("size", size);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilters {
    pub factions: Vec<String>,
    pub points_min: u32,
    pub points_max: u32,
    pub loadout_min: u32,
    pub loadout_max: u32,
    pub min_games: u32,
    pub sort_metric: ListSortMetric,
    pub sort_direction: SortDirection,
}

impl ListFilters {
    pub fn for_source(source: DataSource) -> Self {
        Self {
            factions: Vec::new(),
            points_min: 0,
            points_max: source.points_max(),
            loadout_min: 0,
            loadout_max: LOADOUT_MAX,
            min_games: 0,
            sort_metric: ListSortMetric::default(),
            sort_direction: SortDirection::default(),
        }
    }

    pub fn to_query(&self, source: DataSource, page: u32) -> QueryParams {
        let mut params = QueryParams::new();
        push_paging(&mut params, page, LIST_PAGE_SIZE);
        params
            .set("data_source", source)
            .set("sort_metric", self.sort_metric.as_str())
            .set("sort_direction", self.sort_direction.as_str());

        if self.points_min > 0 {
            params.set("points_min", self.points_min);
        }
        if self.points_max > 0 && self.points_max < source.points_max() {
            params.set("points_max", self.points_max);
        }
        if self.min_games > 0 {
            params.set("min_games", self.min_games);
        }
        if source.supports_loadout() {
            if self.loadout_min > 0 {
                params.set("loadout_min", self.loadout_min);
            }
            if self.loadout_max < LOADOUT_MAX {
                params.set("loadout_max", self.loadout_max);
            }
        }

        params.append_all("factions", &self.factions);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipFilters {
    pub factions: Vec<String>,
    pub ships: Vec<String>,
    pub sort_metric: ShipSortMetric,
    pub sort_direction: SortDirection,
}

impl ShipFilters {
    pub fn to_query(&self, source: DataSource, page: u32) -> QueryParams {
        let mut params = QueryParams::new();
        push_paging(&mut params, page, SHIP_PAGE_SIZE);
        params
            .set("data_source", source)
            .set("sort_metric", self.sort_metric.as_str())
            .set("sort_direction", self.sort_direction.as_str())
            .append_all("factions", &self.factions)
            .append_all("ships", &self.ships);
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardTab {
    #[default]
    Pilots,
    Upgrades,
}

impl CardTab {
    pub fn as_str(self) -> &'static str {
        match self {
            CardTab::Pilots => "pilots",
            CardTab::Upgrades => "upgrades",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CardTab::Pilots => "Pilots",
            CardTab::Upgrades => "Upgrades",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilters {
    pub tab: CardTab,
    pub search_text: String,
    pub factions: Vec<String>,
    pub ships: Vec<String>,
    pub initiatives: Vec<u8>,
    pub upgrade_types: Vec<String>,
}

impl CardFilters {
    /// Ship choices depend on the faction selection, so they are cleared with it.
    pub fn toggle_faction(&mut self, faction: &str) {
        toggle(&mut self.factions, faction.to_string());
        self.ships.clear();
    }

    pub fn to_query(&self, page: u32) -> QueryParams {
        let mut params = QueryParams::new();
        push_paging(&mut params, page, CARD_PAGE_SIZE);

        let search = self.search_text.trim();
        if !search.is_empty() {
            params.set("search_text", search);
        }

        match self.tab {
            CardTab::Pilots => {
                params
                    .append_all("factions", &self.factions)
                    .append_all("ships", &self.ships)
                    .append_all("initiatives", &self.initiatives);
            }
            CardTab::Upgrades => {
                params.append_all("upgrade_types", &self.upgrade_types);
            }
        }
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentFilters {
    pub search: String,
    pub formats: Vec<i32>,
}

impl TournamentFilters {
    pub fn to_query(&self, page: u32) -> QueryParams {
        let mut params = QueryParams::new();
        push_paging(&mut params, page, TOURNAMENT_PAGE_SIZE);
        let search = self.search.trim();
        if !search.is_empty() {
            params.set("search", search);
        }
        params.append_all("format", &self.formats);
        params
    }
}

/// Squadron aggregates are served as-is by the backend; only the paging and
/// faction keys are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SquadronFilters {
    pub factions: Vec<String>,
}

impl SquadronFilters {
    pub fn to_query(&self, page: u32) -> QueryParams {
        let mut params = QueryParams::new();
        push_paging(&mut params, page, SQUADRON_PAGE_SIZE);
        params.append_all("factions", &self.factions);
        params
    }
}

/// Filter set plus zero-based page index for one browser view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState<F> {
    filters: F,
    page: u32,
}

impl<F> BrowserState<F> {
    pub fn new(filters: F) -> Self {
        Self { filters, page: 0 }
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Apply a filter or sort change. The result set may shrink, so the page
    /// index always returns to 0.
    pub fn edit(&mut self, change: impl FnOnce(&mut F)) {
        change(&mut self.filters);
        self.page = 0;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn reset(&mut self, filters: F) {
        self.filters = filters;
        self.page = 0;
    }
}

impl<F: Default> Default for BrowserState<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn pair_set(query: &str) -> BTreeSet<(String, String)> {
        QueryParams::parse(query).pairs().iter().cloned().collect()
    }

    fn expected(pairs: &[(&str, &str)]) -> BTreeSet<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn multi_select_repeats_keys_in_order() {
        let filters = ShipFilters {
            factions: vec!["rebelalliance".into(), "firstorder".into()],
            ..ShipFilters::default()
        };
        let query = filters.to_query(DataSource::Xwa, 0).to_query_string();
        assert!(query.contains("factions=rebelalliance&factions=firstorder"));
        assert!(!query.contains("%2C"));
    }

    #[test]
    fn ships_request_serializes_expected_pairs() {
        let filters = ShipFilters {
            factions: vec!["galacticempire".into()],
            ships: Vec::new(),
            sort_metric: ShipSortMetric::WinRate,
            sort_direction: SortDirection::Asc,
        };
        let query = filters.to_query(DataSource::Xwa, 0).to_query_string();

        assert!(query.contains("sort_metric=Win+Rate"));
        assert_eq!(
            pair_set(&query),
            expected(&[
                ("data_source", "xwa"),
                ("factions", "galacticempire"),
                ("page", "0"),
                ("size", "20"),
                ("sort_direction", "asc"),
                ("sort_metric", "Win Rate"),
            ])
        );
    }

    #[test]
    fn list_ranges_are_omitted_at_their_defaults() {
        let filters = ListFilters::for_source(DataSource::Xwa);
        let params = filters.to_query(DataSource::Xwa, 0);
        for key in ["points_min", "points_max", "loadout_min", "loadout_max", "min_games"] {
            assert!(!params.contains_key(key), "{key} should be omitted");
        }
        assert_eq!(params.get("sort_metric"), Some("Games"));
    }

    #[test]
    fn list_ranges_are_included_when_narrowed() {
        let mut filters = ListFilters::for_source(DataSource::Xwa);
        filters.points_min = 10;
        filters.points_max = 45;
        filters.loadout_max = 30;
        filters.min_games = 3;

        let params = filters.to_query(DataSource::Xwa, 1);
        assert_eq!(params.get("points_min"), Some("10"));
        assert_eq!(params.get("points_max"), Some("45"));
        assert_eq!(params.get("loadout_max"), Some("30"));
        assert_eq!(params.get("min_games"), Some("3"));
        assert_eq!(params.get("page"), Some("1"));
    }

    #[test]
    fn legacy_lists_never_send_loadout_bounds() {
        let mut filters = ListFilters::for_source(DataSource::Legacy);
        assert_eq!(filters.points_max, 200);
        filters.loadout_min = 5;
        filters.loadout_max = 20;

        let params = filters.to_query(DataSource::Legacy, 0);
        assert!(!params.contains_key("loadout_min"));
        assert!(!params.contains_key("loadout_max"));
        assert!(!params.contains_key("points_max"));
        assert_eq!(params.get("data_source"), Some("legacy"));
    }

    #[test]
    fn editing_filters_resets_page() {
        let mut state = BrowserState::new(ShipFilters::default());
        state.set_page(3);
        assert_eq!(state.page(), 3);

        state.edit(|f| toggle(&mut f.factions, "rebelalliance".to_string()));

        assert_eq!(state.page(), 0);
        let params = state.filters().to_query(DataSource::Xwa, state.page());
        assert_eq!(params.get("page"), Some("0"));
    }

    #[test]
    fn toggling_sort_direction_resets_page() {
        let mut state = BrowserState::new(ListFilters::for_source(DataSource::Xwa));
        state.set_page(2);
        state.edit(|f| f.sort_direction = f.sort_direction.toggled());
        assert_eq!(state.page(), 0);
        assert_eq!(state.filters().sort_direction, SortDirection::Asc);
    }

    #[test]
    fn card_queries_depend_on_tab() {
        let mut filters = CardFilters {
            search_text: "  vader ".into(),
            factions: vec!["galacticempire".into()],
            ships: vec!["tieadvancedx1".into()],
            initiatives: vec![6, 5],
            upgrade_types: vec!["talent".into()],
            ..CardFilters::default()
        };

        let pilots = filters.to_query(0);
        assert_eq!(pilots.get("size"), Some("36"));
        assert_eq!(pilots.get("search_text"), Some("vader"));
        assert_eq!(pilots.get_all("initiatives"), vec!["6", "5"]);
        assert!(!pilots.contains_key("upgrade_types"));

        filters.tab = CardTab::Upgrades;
        let upgrades = filters.to_query(0);
        assert_eq!(upgrades.get_all("upgrade_types"), vec!["talent"]);
        assert!(!upgrades.contains_key("factions"));
    }

    #[test]
    fn card_faction_toggle_clears_ships() {
        let mut filters = CardFilters {
            ships: vec!["t65xwing".into()],
            ..CardFilters::default()
        };
        filters.toggle_faction("rebelalliance");
        assert_eq!(filters.factions, vec!["rebelalliance".to_string()]);
        assert!(filters.ships.is_empty());
    }

    #[test]
    fn tournament_query_repeats_format() {
        let filters = TournamentFilters {
            search: String::new(),
            formats: vec![17, 13],
        };
        let query = filters.to_query(0).to_query_string();
        assert_eq!(query, "page=0&size=15&format=17&format=13");
    }

    #[test]
    fn toggle_removes_and_appends() {
        let mut values = vec!["a", "b", "c"];
        toggle(&mut values, "b");
        assert_eq!(values, vec!["a", "c"]);
        toggle(&mut values, "b");
        assert_eq!(values, vec!["a", "c", "b"]);
    }

    #[test]
    fn data_source_parsing_and_metric_lookup() {
        assert_eq!(DataSource::parse("Legacy"), Some(DataSource::Legacy));
        assert_eq!(DataSource::parse("amg"), None);
        assert_eq!(ShipSortMetric::parse("Win Rate"), Some(ShipSortMetric::WinRate));
        assert_eq!(ListSortMetric::parse("Items"), None);
    }

    #[test]
    fn squadron_query_pages_and_repeats_factions() {
        let filters = SquadronFilters {
            factions: vec!["firstorder".into(), "resistance".into()],
        };
        assert_eq!(
            filters.to_query(1).to_query_string(),
            "page=1&size=20&factions=firstorder&factions=resistance"
        );
    }
}
