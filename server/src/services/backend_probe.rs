use std::sync::atomic::Ordering;
use std::time::Duration;

use tracing::{info, warn};

use crate::state::AppState;

/// Any HTTP answer counts as reachable; only transport failures do not.
pub async fn probe_once(state: &AppState) -> bool {
    let url = format!("{}/", state.backend_url);
    match state.http_client.get(&url).send().await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, %url, "backend probe failed");
            false
        }
    }
}

pub async fn run(state: AppState, every: Duration) {
    let mut interval = tokio::time::interval(every);

    loop {
        interval.tick().await;

        let reachable = probe_once(&state).await;
        let previous = state.backend_reachable.swap(reachable, Ordering::Relaxed);
        if previous != reachable {
            if reachable {
                info!(backend_url = %state.backend_url, "backend is reachable");
            } else {
                warn!(backend_url = %state.backend_url, "backend became unreachable");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probe_reports_listening_and_closed_backends() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("listener address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, axum::Router::new())
                .await
                .expect("serve stub backend");
        });

        let state = AppState::new(format!("http://{addr}"), Duration::from_secs(300))
            .expect("build state");
        // An empty router answers 404, which still proves the backend is up.
        assert!(probe_once(&state).await);

        handle.abort();
        let _ = handle.await;

        let closed = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let closed_addr = closed.local_addr().expect("listener address");
        drop(closed);
        let state = AppState::new(format!("http://{closed_addr}"), Duration::from_secs(300))
            .expect("build state");
        assert!(!probe_once(&state).await);
    }
}
