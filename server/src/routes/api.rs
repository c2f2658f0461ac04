use std::fmt::Write as _;

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chrono::Utc;
use m3tacron_shared::DataSource;
use std::sync::atomic::Ordering;

use crate::state::{AppState, CachedSnapshot, ObservabilitySnapshot};
use crate::upstream::{self, UpstreamError};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
const SNAPSHOT_CACHE_CONTROL: &str = "public, max-age=60";
const PROXY_CACHE_CONTROL: &str = "no-cache";

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "backend_url": state.backend_url.as_ref(),
        "backend_reachable": state.backend_reachable.load(Ordering::Relaxed),
        "snapshot_cache_size": state.snapshot_cache.len(),
        "observability": {
            "proxied_requests_total": observability.proxied_requests_total,
            "upstream_errors_total": observability.upstream_errors_total,
            "snapshot_cache_hits_total": observability.snapshot_cache_hits_total,
            "snapshot_cache_misses_total": observability.snapshot_cache_misses_total,
        }
    }))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_prometheus_metrics(
        state.snapshot_cache.len(),
        state.backend_reachable.load(Ordering::Relaxed),
        state.observability.snapshot(),
    );

    (
        [
            (header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

fn write_metric(body: &mut String, name: &str, kind: &str, help: &str, value: u64) {
    let _ = writeln!(body, "# HELP {name} {help}");
    let _ = writeln!(body, "# TYPE {name} {kind}");
    let _ = writeln!(body, "{name} {value}");
}

fn render_prometheus_metrics(
    snapshot_cache_size: usize,
    backend_reachable: bool,
    observability: ObservabilitySnapshot,
) -> String {
    let mut body = String::new();
    write_metric(
        &mut body,
        "m3tacron_snapshot_cache_size",
        "gauge",
        "Number of data sources with a cached meta snapshot.",
        snapshot_cache_size as u64,
    );
    write_metric(
        &mut body,
        "m3tacron_backend_reachable",
        "gauge",
        "Whether the last backend probe succeeded (1 or 0).",
        u64::from(backend_reachable),
    );
    write_metric(
        &mut body,
        "m3tacron_proxied_requests_total",
        "counter",
        "Total API requests forwarded to the backend.",
        observability.proxied_requests_total,
    );
    write_metric(
        &mut body,
        "m3tacron_upstream_errors_total",
        "counter",
        "Total backend failures (unreachable or non-2xx).",
        observability.upstream_errors_total,
    );
    write_metric(
        &mut body,
        "m3tacron_snapshot_cache_hits_total",
        "counter",
        "Total meta-snapshot requests served from cache.",
        observability.snapshot_cache_hits_total,
    );
    write_metric(
        &mut body,
        "m3tacron_snapshot_cache_misses_total",
        "counter",
        "Total meta-snapshot requests fetched from the backend.",
        observability.snapshot_cache_misses_total,
    );
    body
}

#[derive(Debug, serde::Deserialize)]
pub struct MetaSnapshotQuery {
    #[serde(default)]
    pub data_source: Option<String>,
}

/// Missing source means XWA; anything unrecognised is rejected.
fn parse_data_source(raw: Option<&str>) -> Result<DataSource, StatusCode> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DataSource::default()),
        Some(value) => DataSource::parse(value).ok_or(StatusCode::BAD_REQUEST),
    }
}

pub async fn meta_snapshot(
    State(state): State<AppState>,
    Query(query): Query<MetaSnapshotQuery>,
) -> Result<Response, StatusCode> {
    let source = parse_data_source(query.data_source.as_deref())?;

    if let Some(cached) = state.snapshot_cache.get(&source) {
        if cached.is_fresh(Utc::now(), state.snapshot_ttl) {
            state.observability.record_snapshot_cache_hit();
            return Ok(json_bytes_response(
                cached.body.clone(),
                None,
                SNAPSHOT_CACHE_CONTROL,
            ));
        }
    }
    state.observability.record_snapshot_cache_miss();

    let url = state.backend_api_url("meta-snapshot", Some(&format!("data_source={source}")));
    let fetched = upstream::fetch(&state.http_client, &url)
        .await
        .map_err(|e| upstream_failure(&state, &url, e))?;

    state
        .snapshot_cache
        .insert(source, CachedSnapshot::new(fetched.body.clone()));

    Ok(json_bytes_response(
        fetched.body,
        fetched.content_type,
        SNAPSHOT_CACHE_CONTROL,
    ))
}

/// The captured path is already percent-decoded, so anything that would
/// change the meaning of the backend URL is rejected outright.
fn validate_proxy_path(path: &str) -> Result<&str, StatusCode> {
    let trimmed = path.trim_matches('/');
    let unsafe_segment = |segment: &str| {
        segment == ".."
            || segment == "."
            || segment.contains(['?', '#', '%', '\\'])
    };
    if trimmed.is_empty() || trimmed.split('/').any(unsafe_segment) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(trimmed)
}

pub async fn proxy(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, StatusCode> {
    let path = validate_proxy_path(&path)?;
    state.observability.record_proxied_request();

    let url = state.backend_api_url(path, raw_query.as_deref());
    let fetched = upstream::fetch(&state.http_client, &url)
        .await
        .map_err(|e| upstream_failure(&state, &url, e))?;

    Ok(json_bytes_response(
        fetched.body,
        fetched.content_type,
        PROXY_CACHE_CONTROL,
    ))
}

fn upstream_failure(state: &AppState, url: &str, error: UpstreamError) -> StatusCode {
    state.observability.record_upstream_error();
    let status = error.status_code();
    tracing::warn!(error = %error, %url, status = status.as_u16(), "backend request failed");
    status
}

fn json_bytes_response(
    body: Bytes,
    content_type: Option<HeaderValue>,
    cache_control: &'static str,
) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        content_type.unwrap_or_else(|| HeaderValue::from_static("application/json")),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    response
}
