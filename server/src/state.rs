use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use m3tacron_shared::DataSource;

use crate::config::{upstream_connect_timeout, upstream_http_timeout};

/// Raw meta-snapshot body as returned by the backend.
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub body: Bytes,
    pub fetched_at: DateTime<Utc>,
}

impl CachedSnapshot {
    pub fn new(body: Bytes) -> Self {
        Self {
            body,
            fetched_at: Utc::now(),
        }
    }

    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.fetched_at).num_seconds()
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        self.age_secs(now) < ttl_secs
    }
}

#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    pub backend_url: Arc<str>,
    pub snapshot_cache: Arc<DashMap<DataSource, CachedSnapshot>>,
    pub snapshot_ttl: Duration,
    /// Last result of the background reachability probe.
    pub backend_reachable: Arc<AtomicBool>,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    proxied_requests_total: AtomicU64,
    upstream_errors_total: AtomicU64,
    snapshot_cache_hits_total: AtomicU64,
    snapshot_cache_misses_total: AtomicU64,
}

#[derive(Debug, Clone, Copy)]
pub struct ObservabilitySnapshot {
    pub proxied_requests_total: u64,
    pub upstream_errors_total: u64,
    pub snapshot_cache_hits_total: u64,
    pub snapshot_cache_misses_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            proxied_requests_total: self.proxied_requests_total.load(Ordering::Relaxed),
            upstream_errors_total: self.upstream_errors_total.load(Ordering::Relaxed),
            snapshot_cache_hits_total: self.snapshot_cache_hits_total.load(Ordering::Relaxed),
            snapshot_cache_misses_total: self.snapshot_cache_misses_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_proxied_request(&self) {
        self.proxied_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_error(&self) {
        self.upstream_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_snapshot_cache_hit(&self) {
        self.snapshot_cache_hits_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_snapshot_cache_miss(&self) {
        self.snapshot_cache_misses_total
            .fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new(backend_url: impl Into<String>, snapshot_ttl: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent("m3tacron/0.1")
            .timeout(upstream_http_timeout())
            .connect_timeout(upstream_connect_timeout())
            .build()?;
        let backend_url: String = backend_url.into();

        Ok(Self {
            http_client,
            backend_url: Arc::from(backend_url.trim_end_matches('/')),
            snapshot_cache: Arc::new(DashMap::new()),
            snapshot_ttl,
            backend_reachable: Arc::new(AtomicBool::new(false)),
            observability: Arc::new(ObservabilityCounters::default()),
        })
    }

    /// `{backend}/api/{path}`, with the raw query appended untouched so
    /// repeated keys survive.
    pub fn backend_api_url(&self, path: &str, raw_query: Option<&str>) -> String {
        let path = path.trim_start_matches('/');
        match raw_query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{}/api/{path}?{query}", self.backend_url),
            None => format!("{}/api/{path}", self.backend_url),
        }
    }
}
