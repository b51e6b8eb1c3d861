use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::ApiError;

/// Parse a response body returned by one of the text operations.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(body)?)
}

// --- Monitors ---

/// A monitor (camera input) as listed by `/{apikey}/monitor/{group}/`.
///
/// Only the commonly used fields are typed; everything else the server sends
/// is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub mid: String,
    #[serde(default)]
    pub ke: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The monitor endpoints answer with a bare object when the group holds a
/// single monitor.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum MonitorList {
    Many(Vec<Monitor>),
    One(Box<Monitor>),
}

impl MonitorList {
    pub(crate) fn into_vec(self) -> Vec<Monitor> {
        match self {
            Self::Many(monitors) => monitors,
            Self::One(monitor) => vec![*monitor],
        }
    }
}

// --- Videos ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<serde_json::Value>,
    #[serde(default)]
    pub skip: Option<u64>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub mid: Option<String>,
    #[serde(default)]
    pub ke: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_keeps_unknown_fields() {
        let monitor: Monitor = decode(
            r#"{"mid":"abc","name":"Porch","type":"h264","status":"Watching","fps":"15"}"#,
        )
        .unwrap();
        assert_eq!(monitor.mid, "abc");
        assert_eq!(monitor.kind.as_deref(), Some("h264"));
        assert_eq!(monitor.status.as_deref(), Some("Watching"));
        assert_eq!(monitor.extra["fps"], "15");
    }

    #[test]
    fn monitor_list_accepts_single_object() {
        let list: MonitorList = decode(r#"{"mid":"abc"}"#).unwrap();
        assert_eq!(list.into_vec().len(), 1);
    }

    #[test]
    fn monitor_list_accepts_array() {
        let list: MonitorList = decode(r#"[{"mid":"a"},{"mid":"b"}]"#).unwrap();
        let mids: Vec<_> = list.into_vec().into_iter().map(|m| m.mid).collect();
        assert_eq!(mids, ["a", "b"]);
    }

    #[test]
    fn video_list_defaults_missing_videos() {
        let list: VideoList = decode(r#"{"isUTC":true}"#).unwrap();
        assert!(list.videos.is_empty());
        assert_eq!(list.extra["isUTC"], true);
    }

    #[test]
    fn decode_rejects_non_json() {
        let err = decode::<VideoList>("<html>").unwrap_err();
        assert!(matches!(err, ApiError::Json(_)), "got: {err}");
    }
}
