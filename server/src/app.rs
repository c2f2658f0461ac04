use std::path::{Path, PathBuf};

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, header},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState, static_dir: PathBuf) -> Router {
    // Client-side routes (/ships, /cards, ...) resolve to the SPA shell.
    let index = ServeFile::new(static_dir.join("index.html"));
    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(&static_dir)
                .precompressed_br()
                .precompressed_gzip()
                .fallback(index),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    let api = Router::new()
        .route("/api/health", get(routes::api::health))
        .route("/api/metrics", get(routes::api::metrics))
        .route("/api/meta-snapshot", get(routes::api::meta_snapshot))
        .route("/api/{*path}", get(routes::api::proxy))
        .layer(cors);

    api.layer(CompressionLayer::new())
        .fallback_service(static_assets)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success() {
        if let Some(cache_control) = cache_control_for_path(&path) {
            response.headers_mut().insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static(cache_control),
            );
        }
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    if is_hashed_bundle_asset(path) {
        return Some("public, max-age=31536000, immutable");
    }

    if path.starts_with("/fonts/") || path.starts_with("/icons/") {
        return Some("public, max-age=86400");
    }

    // The SPA shell names the current bundle hashes, so it must revalidate.
    if is_document_path(path) {
        return Some("no-cache");
    }

    None
}

fn is_document_path(path: &str) -> bool {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ext == "html",
        None => true,
    }
}

fn is_hashed_bundle_asset(path: &str) -> bool {
    let Some(ext) = Path::new(path).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }

    let Some(filename) = Path::new(path).file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    filename
        .split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    #[test]
    fn immutable_cache_for_hashed_bundle_assets() {
        assert_eq!(
            cache_control_for_path("/m3tacron-client-71578f6b278221f3_bg.wasm"),
            Some("public, max-age=31536000, immutable")
        );
        assert_eq!(
            cache_control_for_path("/index-a93762ff3bf6d63a.css"),
            Some("public, max-age=31536000, immutable")
        );
    }

    #[test]
    fn shell_revalidates_and_plain_assets_are_untouched() {
        assert_eq!(cache_control_for_path("/"), Some("no-cache"));
        assert_eq!(cache_control_for_path("/index.html"), Some("no-cache"));
        assert_eq!(cache_control_for_path("/ships"), Some("no-cache"));
        assert_eq!(
            cache_control_for_path("/fonts/xwing-miniatures.ttf"),
            Some("public, max-age=86400")
        );
        assert_eq!(cache_control_for_path("/favicon.png"), None);
    }

    fn static_fixture() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "m3tacron-static-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        std::fs::create_dir_all(&dir).expect("create fixture dir");
        std::fs::write(dir.join("index.html"), "<div id=\"app\"></div>").expect("write index");
        std::fs::write(dir.join("app-0123456789abcdef.js"), "console.log(1)").expect("write bundle");
        dir
    }

    async fn get_path(app: Router, path: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).expect("request"))
            .await
            .expect("router response");
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, cache, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn client_routes_fall_back_to_index() {
        let dir = static_fixture();
        let state = AppState::new("http://127.0.0.1:9", Duration::from_secs(300)).expect("build state");
        let app = build_app(state, dir.clone());

        let (status, cache, body) = get_path(app.clone(), "/ships").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("no-cache"));
        assert!(body.contains("id=\"app\""));

        let (status, cache, body) = get_path(app, "/app-0123456789abcdef.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("public, max-age=31536000, immutable"));
        assert_eq!(body, "console.log(1)");

        let _ = std::fs::remove_dir_all(dir);
    }
}
