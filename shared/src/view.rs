//! Application-level view parameters: which page is shown and for which
//! data source. This is the only state carried in the URL.

use crate::query::{DataSource, QueryParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Tournaments,
    Squadrons,
    Lists,
    Ships,
    Cards,
}

impl Route {
    /// Navigation order.
    pub const ALL: [Route; 6] = [
        Route::Dashboard,
        Route::Tournaments,
        Route::Squadrons,
        Route::Lists,
        Route::Ships,
        Route::Cards,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Tournaments => "/tournaments",
            Route::Squadrons => "/squadrons",
            Route::Lists => "/lists",
            Route::Ships => "/ships",
            Route::Cards => "/cards",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Route::Dashboard => "DASHBOARD",
            Route::Tournaments => "TOURNAMENTS",
            Route::Squadrons => "SQUADRONS",
            Route::Lists => "LISTS",
            Route::Ships => "SHIPS",
            Route::Cards => "CARDS",
        }
    }

    /// Unknown paths land on the dashboard.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL
            .into_iter()
            .find(|r| r.path() == trimmed)
            .unwrap_or_default()
    }

    /// Whether the page reads per-format statistics (and so shows the
    /// source toggle).
    pub fn uses_source(self) -> bool {
        matches!(self, Route::Dashboard | Route::Lists | Route::Ships)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewParams {
    pub route: Route,
    pub source: DataSource,
}

impl ViewParams {
    /// Build from `location.pathname` and `location.search`. An absent or
    /// unrecognised `source` falls back to XWA.
    pub fn from_location(pathname: &str, search: &str) -> Self {
        let params = QueryParams::parse(search);
        Self {
            route: Route::from_path(pathname),
            source: params
                .get("source")
                .and_then(DataSource::parse)
                .unwrap_or_default(),
        }
    }

    pub fn with_route(self, route: Route) -> Self {
        Self { route, ..self }
    }

    pub fn with_source(self, source: DataSource) -> Self {
        Self { source, ..self }
    }

    /// Relative URL for history entries and nav links.
    pub fn to_url(&self) -> String {
        let path = self.route.path();
        match self.source {
            DataSource::Xwa => path.to_string(),
            source => {
                let mut params = QueryParams::new();
                params.set("source", source);
                format!("{path}?{params}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_and_source() {
        let view = ViewParams::from_location("/ships/", "?source=legacy&x=1");
        assert_eq!(view.route, Route::Ships);
        assert_eq!(view.source, DataSource::Legacy);
    }

    #[test]
    fn unknown_values_fall_back() {
        let view = ViewParams::from_location("/nowhere", "?source=amg");
        assert_eq!(view, ViewParams::default());
        assert_eq!(Route::from_path(""), Route::Dashboard);
    }

    #[test]
    fn url_keeps_source_only_when_not_default() {
        let legacy = ViewParams {
            route: Route::Lists,
            source: DataSource::Legacy,
        };
        assert_eq!(legacy.to_url(), "/lists?source=legacy");
        assert_eq!(legacy.with_source(DataSource::Xwa).to_url(), "/lists");
        assert_eq!(
            ViewParams::from_location("/lists", "?source=legacy").to_url(),
            "/lists?source=legacy"
        );
    }

    #[test]
    fn switching_route_keeps_source() {
        let view = ViewParams::default()
            .with_source(DataSource::Legacy)
            .with_route(Route::Cards);
        assert_eq!(view.to_url(), "/cards?source=legacy");
    }
}
