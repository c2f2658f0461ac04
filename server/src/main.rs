mod app;
mod config;
mod routes;
mod services;
mod state;
mod upstream;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let backend_url = config::backend_url();
    let static_dir = config::static_dir();
    let snapshot_ttl = config::snapshot_revalidate();

    let state = match AppState::new(backend_url.clone(), snapshot_ttl) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to build backend HTTP client");
            return;
        }
    };
    tracing::info!(
        %backend_url,
        static_dir = %static_dir.display(),
        snapshot_ttl_secs = snapshot_ttl.as_secs(),
        "M3taCron edge configured"
    );

    // Spawn background services
    tokio::spawn(services::backend_probe::run(
        state.clone(),
        config::backend_probe_interval(),
    ));
    tokio::spawn(services::snapshot_evictor::run(
        state.clone(),
        std::time::Duration::from_secs(config::SNAPSHOT_EVICTION_INTERVAL_SECS),
    ));

    let app = app::build_app(state, static_dir);

    let addr = format!("0.0.0.0:{}", config::server_port());
    tracing::info!("M3taCron server listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind TCP listener");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
    }

    tracing::info!("Server shut down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
