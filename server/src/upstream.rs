use axum::http::{HeaderValue, StatusCode, header};
use bytes::Bytes;

/// Failure talking to the analytics backend.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("backend responded with {0}")]
    Status(StatusCode),
    #[error("failed to read backend response: {0}")]
    Body(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Status returned to the browser: the backend's own status when it
    /// answered, otherwise 502.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Status(status) => *status,
            UpstreamError::Unreachable(_) | UpstreamError::Body(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamBody {
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// GET `url` and return the body of a 2xx response.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<UpstreamBody, UpstreamError> {
    let resp = client
        .get(url)
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(UpstreamError::Unreachable)?;

    if !resp.status().is_success() {
        let status =
            StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        return Err(UpstreamError::Status(status));
    }

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| HeaderValue::from_bytes(v.as_bytes()).ok());
    let body = resp.bytes().await.map_err(UpstreamError::Body)?;

    Ok(UpstreamBody { content_type, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_keep_backend_status() {
        assert_eq!(
            UpstreamError::Status(StatusCode::NOT_FOUND).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            UpstreamError::Status(StatusCode::SERVICE_UNAVAILABLE).to_string(),
            "backend responded with 503 Service Unavailable"
        );
    }

    #[tokio::test]
    async fn unreachable_backend_maps_to_bad_gateway() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind probe listener");
        let addr = listener.local_addr().expect("listener address");
        drop(listener);

        let err = fetch(&reqwest::Client::new(), &format!("http://{addr}/api/ships"))
            .await
            .expect_err("closed port should fail");
        assert!(matches!(err, UpstreamError::Unreachable(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
