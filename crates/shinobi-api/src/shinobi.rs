use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use tracing::warn;
use url::Url;

use crate::client::{ApiError, DEFAULT_TIMEOUT, HttpClient};
use crate::config::{Camera, ShinobiConfig};
use crate::models::{Monitor, MonitorList, VideoList, decode};

/// Client for the Shinobi REST API.
///
/// Shinobi authenticates by API key in the first path segment:
/// `GET {server}/{apikey}/monitor/{group}/`. Every operation issues exactly
/// one request and hands back the body as text.
#[derive(Clone)]
pub struct ShinobiClient {
    http: HttpClient,
    config: ShinobiConfig,
}

/// Query payload sent with a motion trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotionEvent<'a> {
    pub plug: &'a str,
    pub name: &'a str,
    pub reason: &'a str,
    pub confidence: u32,
}

impl<'a> MotionEvent<'a> {
    pub const REASON: &'static str = "motion";
    pub const CONFIDENCE: u32 = 200;

    pub fn for_camera(camera: &'a Camera) -> Self {
        Self {
            plug: &camera.name,
            name: &camera.region,
            reason: Self::REASON,
            confidence: Self::CONFIDENCE,
        }
    }
}

/// Result of [`ShinobiClient::trigger_motion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionOutcome {
    /// A camera matched and the server accepted the trigger.
    Triggered(String),
    /// No configured camera has that IP; nothing was sent.
    CameraNotFound,
}

impl MotionOutcome {
    /// Response body, empty when no camera matched.
    pub fn body(&self) -> &str {
        match self {
            Self::Triggered(body) => body,
            Self::CameraNotFound => "",
        }
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self, Self::Triggered(_))
    }
}

impl ShinobiClient {
    /// Create a client with the default 10 second request timeout.
    pub fn new(config: ShinobiConfig) -> Result<Self, ApiError> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests all give up after `timeout`.
    pub fn with_timeout(config: ShinobiConfig, timeout: Duration) -> Result<Self, ApiError> {
        Url::parse(&config.server)?;
        Ok(Self {
            http: HttpClient::new(timeout)?,
            config,
        })
    }

    /// Decode a JSON config blob and build a client from it.
    pub fn from_json(blob: &str) -> Result<Self, ApiError> {
        Self::new(ShinobiConfig::from_json(blob)?)
    }

    pub fn config(&self) -> &ShinobiConfig {
        &self.config
    }

    pub fn timeout(&self) -> Duration {
        self.http.timeout()
    }

    /// GET `/{apikey}/monitor/{group}/` — all monitors in a group.
    pub async fn get_monitors(&self, group: &str) -> Result<String, ApiError> {
        self.get(&format!("/{}/monitor/{group}/", self.config.apikey))
            .await
    }

    /// GET `/{apikey}/smonitor/{group}/` — monitors currently started.
    pub async fn get_started_monitors(&self, group: &str) -> Result<String, ApiError> {
        self.get(&format!("/{}/smonitor/{group}/", self.config.apikey))
            .await
    }

    /// GET `/{apikey}/videos/{group}/`
    pub async fn get_videos(&self, group: &str) -> Result<String, ApiError> {
        self.get(&format!("/{}/videos/{group}/", self.config.apikey))
            .await
    }

    /// GET `/{apikey}/videos/{group}/{id}[?query]` — videos of one monitor.
    ///
    /// `query` is appended as-is (e.g. `limit=5&start=...`); an empty query
    /// adds no `?`.
    pub async fn get_videos_by_id(
        &self,
        group: &str,
        id: &str,
        query: &str,
    ) -> Result<String, ApiError> {
        let mut path = format!("/{}/videos/{group}/{id}", self.config.apikey);
        if !query.is_empty() {
            path.push('?');
            path.push_str(query);
        }
        self.get(&path).await
    }

    /// GET `/{apikey}/motion/{group}/{name}?data={...}` for the camera at `ip`.
    pub async fn trigger_motion(&self, ip: &str) -> Result<MotionOutcome, ApiError> {
        let Some(camera) = self.config.camera_by_ip(ip) else {
            warn!(ip, "no configured camera matches, motion trigger skipped");
            return Ok(MotionOutcome::CameraNotFound);
        };

        let data = serde_json::to_string(&MotionEvent::for_camera(camera))?;
        let data: String = url::form_urlencoded::byte_serialize(data.as_bytes()).collect();
        let body = self
            .get(&format!(
                "/{}/motion/{}/{}?data={data}",
                self.config.apikey, camera.group, camera.name
            ))
            .await?;
        Ok(MotionOutcome::Triggered(body))
    }

    /// Issue one request against the configured server.
    ///
    /// The endpoint operations all go through here; it is public for
    /// endpoints this client does not wrap.
    pub async fn run_request(
        &self,
        method: Method,
        path: &str,
        body: &str,
    ) -> Result<String, ApiError> {
        self.http
            .run_request(method, &self.config.server, path, body)
            .await
    }

    // --- Typed responses ---

    /// [`get_monitors`](Self::get_monitors), decoded.
    pub async fn monitors(&self, group: &str) -> Result<Vec<Monitor>, ApiError> {
        let list: MonitorList = decode(&self.get_monitors(group).await?)?;
        Ok(list.into_vec())
    }

    /// [`get_started_monitors`](Self::get_started_monitors), decoded.
    pub async fn started_monitors(&self, group: &str) -> Result<Vec<Monitor>, ApiError> {
        let list: MonitorList = decode(&self.get_started_monitors(group).await?)?;
        Ok(list.into_vec())
    }

    /// [`get_videos`](Self::get_videos), decoded.
    pub async fn videos(&self, group: &str) -> Result<VideoList, ApiError> {
        decode(&self.get_videos(group).await?)
    }

    async fn get(&self, path: &str) -> Result<String, ApiError> {
        self.run_request(Method::GET, path, "").await
    }
}

impl std::fmt::Debug for ShinobiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShinobiClient")
            .field("server", &self.config.server)
            .field("cameras", &self.config.cameras.len())
            .field("http", &self.http)
            .finish()
    }
}
