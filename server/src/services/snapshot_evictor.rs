use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::state::AppState;

/// Drop snapshots that are past their revalidate window. Returns the number
/// of evicted entries.
pub fn evict_stale(state: &AppState, now: DateTime<Utc>) -> usize {
    let before = state.snapshot_cache.len();
    state
        .snapshot_cache
        .retain(|_, cached| cached.is_fresh(now, state.snapshot_ttl));
    before.saturating_sub(state.snapshot_cache.len())
}

pub async fn run(state: AppState, every: Duration) {
    let mut interval = tokio::time::interval(every);

    loop {
        interval.tick().await;

        let evicted = evict_stale(&state, Utc::now());
        if evicted > 0 {
            info!(
                "evicted {evicted} stale meta snapshots ({} remaining)",
                state.snapshot_cache.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use m3tacron_shared::DataSource;

    use super::*;
    use crate::state::CachedSnapshot;

    #[test]
    fn only_expired_snapshots_are_evicted() {
        let state = AppState::new("http://127.0.0.1:8000", Duration::from_secs(300))
            .expect("build state");
        let now = Utc::now();
        state.snapshot_cache.insert(
            DataSource::Xwa,
            CachedSnapshot {
                body: Bytes::from_static(b"{}"),
                fetched_at: now - chrono::Duration::seconds(30),
            },
        );
        state.snapshot_cache.insert(
            DataSource::Legacy,
            CachedSnapshot {
                body: Bytes::from_static(b"{}"),
                fetched_at: now - chrono::Duration::seconds(600),
            },
        );

        assert_eq!(evict_stale(&state, now), 1);
        assert!(state.snapshot_cache.contains_key(&DataSource::Xwa));
        assert!(!state.snapshot_cache.contains_key(&DataSource::Legacy));
        assert_eq!(evict_stale(&state, now), 0);
    }
}
