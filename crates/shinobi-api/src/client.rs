use std::time::Duration;

use reqwest::{Method, StatusCode};
use tracing::debug;

/// Per-request timeout applied when none is given explicitly.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("API returned {status}: {body}")]
    ApiResponse { status: u16, body: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Raw HTTP transport used by [`crate::ShinobiClient`].
///
/// Wraps a [`reqwest::Client`] that is owned by this instance alone: the
/// timeout and the relaxed certificate policy apply to requests made through
/// it and to nothing else in the process. Clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    /// Build a transport with the given per-request timeout.
    ///
    /// Shinobi installs commonly run behind self-signed certificates, so
    /// certificate verification is turned off for this transport only.
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self { inner, timeout })
    }

    /// Send `method` to `{base_url}{path}` and return the body as text.
    ///
    /// The URL is a literal concatenation, nothing is escaped or normalised.
    /// A non-empty `body` is attached whatever the method. Any status other
    /// than 200 is returned as [`ApiError::ApiResponse`] together with the
    /// body the server sent.
    pub async fn run_request(
        &self,
        method: Method,
        base_url: &str,
        path: &str,
        body: &str,
    ) -> Result<String, ApiError> {
        let url = format!("{base_url}{path}");
        let mut req = self.inner.request(method.clone(), url.as_str());
        if !body.is_empty() {
            req = req.body(body.to_owned());
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        debug!(
            %method,
            status = status.as_u16(),
            path = %redact_key(path),
            "shinobi request completed"
        );

        if status != StatusCode::OK {
            return Err(ApiError::ApiResponse {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    /// Return the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Shinobi carries the API key in the first path segment; mask it for logs.
fn redact_key(path: &str) -> String {
    match path.strip_prefix('/').and_then(|rest| rest.split_once('/')) {
        Some((_, rest)) => format!("/***/{rest}"),
        None => path.to_owned(),
    }
}
