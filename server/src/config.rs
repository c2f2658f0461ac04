use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "client/dist";
pub const DEFAULT_SNAPSHOT_REVALIDATE_SECS: u64 = 300;
pub const DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_BACKEND_PROBE_INTERVAL_SECS: u64 = 30;
pub const SNAPSHOT_EVICTION_INTERVAL_SECS: u64 = 60;

fn positive_secs(var: &str, default_secs: u64) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default_secs))
}

/// Base URL of the analytics backend, without a trailing slash.
pub fn backend_url() -> String {
    std::env::var("BACKEND_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| value.starts_with("http://") || value.starts_with("https://"))
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}

pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
}

pub fn snapshot_revalidate() -> Duration {
    positive_secs("SNAPSHOT_REVALIDATE_SECS", DEFAULT_SNAPSHOT_REVALIDATE_SECS)
}

pub fn upstream_http_timeout() -> Duration {
    positive_secs("UPSTREAM_HTTP_TIMEOUT_SECS", DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS)
}

pub fn upstream_connect_timeout() -> Duration {
    positive_secs(
        "UPSTREAM_CONNECT_TIMEOUT_SECS",
        DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS,
    )
}

pub fn backend_probe_interval() -> Duration {
    positive_secs(
        "BACKEND_PROBE_INTERVAL_SECS",
        DEFAULT_BACKEND_PROBE_INTERVAL_SECS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        temp_env::with_vars_unset(
            [
                "BACKEND_URL",
                "PORT",
                "STATIC_DIR",
                "SNAPSHOT_REVALIDATE_SECS",
                "BACKEND_PROBE_INTERVAL_SECS",
            ],
            || {
                assert_eq!(backend_url(), DEFAULT_BACKEND_URL);
                assert_eq!(server_port(), DEFAULT_SERVER_PORT);
                assert_eq!(static_dir(), PathBuf::from(DEFAULT_STATIC_DIR));
                assert_eq!(snapshot_revalidate(), Duration::from_secs(300));
                assert_eq!(backend_probe_interval(), Duration::from_secs(30));
            },
        );
    }

    #[test]
    fn overrides_are_parsed_and_trimmed() {
        temp_env::with_vars(
            [
                ("BACKEND_URL", Some("https://stats.example.org/ ")),
                ("PORT", Some("8080")),
                ("STATIC_DIR", Some("/srv/m3tacron")),
                ("SNAPSHOT_REVALIDATE_SECS", Some("45")),
                ("UPSTREAM_CONNECT_TIMEOUT_SECS", Some("1")),
            ],
            || {
                assert_eq!(backend_url(), "https://stats.example.org");
                assert_eq!(server_port(), 8080);
                assert_eq!(static_dir(), PathBuf::from("/srv/m3tacron"));
                assert_eq!(snapshot_revalidate(), Duration::from_secs(45));
                assert_eq!(upstream_connect_timeout(), Duration::from_secs(1));
            },
        );
    }

    #[test]
    fn invalid_values_fall_back() {
        temp_env::with_vars(
            [
                ("BACKEND_URL", Some("localhost:8000")),
                ("PORT", Some("0")),
                ("STATIC_DIR", Some("   ")),
                ("SNAPSHOT_REVALIDATE_SECS", Some("-5")),
                ("UPSTREAM_HTTP_TIMEOUT_SECS", Some("0")),
            ],
            || {
                assert_eq!(backend_url(), DEFAULT_BACKEND_URL);
                assert_eq!(server_port(), DEFAULT_SERVER_PORT);
                assert_eq!(static_dir(), PathBuf::from(DEFAULT_STATIC_DIR));
                assert_eq!(snapshot_revalidate(), Duration::from_secs(300));
                assert_eq!(upstream_http_timeout(), Duration::from_secs(10));
            },
        );
    }
}
