use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Connection settings for a Shinobi server plus the local camera table.
///
/// `server` is joined to request paths verbatim, so it should not end with
/// a slash (e.g. `https://nvr.local:8080`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShinobiConfig {
    pub server: String,
    pub apikey: String,
    #[serde(default)]
    pub cameras: Vec<Camera>,
}

/// Maps a camera's IP address to its monitor name, group and region on the
/// Shinobi server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub name: String,
    pub ip: String,
    pub group: String,
    pub region: String,
}

impl ShinobiConfig {
    pub fn from_json(blob: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(blob)?)
    }

    pub fn from_yaml(blob: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(blob)?)
    }

    /// Read a config file, as YAML for `.yaml`/`.yml` and as JSON otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&contents),
            _ => Self::from_json(&contents),
        }
    }

    /// First camera whose `ip` matches, in configuration order.
    pub fn camera_by_ip(&self, ip: &str) -> Option<&Camera> {
        self.cameras.iter().find(|camera| camera.ip == ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "server": "http://nvr:8080",
        "apikey": "K",
        "cameras": [
            {"name": "cam1", "ip": "10.0.0.5", "group": "grp", "region": "front"},
            {"name": "cam2", "ip": "10.0.0.6", "group": "grp", "region": "back"}
        ]
    }"#;

    #[test]
    fn from_json_reads_all_fields() {
        let config = ShinobiConfig::from_json(FULL).unwrap();
        assert_eq!(config.server, "http://nvr:8080");
        assert_eq!(config.apikey, "K");
        assert_eq!(config.cameras.len(), 2);
        assert_eq!(config.cameras[1].region, "back");
    }

    #[test]
    fn cameras_default_to_empty() {
        let config = ShinobiConfig::from_json(r#"{"server":"http://h","apikey":"K"}"#).unwrap();
        assert!(config.cameras.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ShinobiConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)), "got: {err}");
    }

    #[test]
    fn missing_apikey_is_an_error() {
        let err = ShinobiConfig::from_json(r#"{"server":"http://h"}"#).unwrap_err();
        assert!(err.to_string().contains("apikey"), "got: {err}");
    }

    #[test]
    fn from_yaml_matches_json() {
        let yaml = "\
server: http://nvr:8080
apikey: K
cameras:
  - name: cam1
    ip: 10.0.0.5
    group: grp
    region: front
  - name: cam2
    ip: 10.0.0.6
    group: grp
    region: back
";
        assert_eq!(
            ShinobiConfig::from_yaml(yaml).unwrap(),
            ShinobiConfig::from_json(FULL).unwrap()
        );
    }

    #[test]
    fn camera_by_ip_returns_first_match() {
        let mut config = ShinobiConfig::from_json(FULL).unwrap();
        config.cameras.push(Camera {
            name: "dup".into(),
            ip: "10.0.0.5".into(),
            group: "other".into(),
            region: "side".into(),
        });
        assert_eq!(config.camera_by_ip("10.0.0.5").unwrap().name, "cam1");
        assert!(config.camera_by_ip("10.0.0.99").is_none());
    }

    const YAML: &str = "\
server: http://nvr:8080
apikey: K
cameras:
  - name: cam1
    ip: 10.0.0.5
    group: grp
    region: front
";

    #[test]
    fn load_picks_decoder_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        for name in ["shinobi.yml", "shinobi.yaml"] {
            let path = dir.path().join(name);
            std::fs::write(&path, YAML).unwrap();
            let config = ShinobiConfig::load(&path).unwrap();
            assert_eq!(config.cameras[0].region, "front", "{name}");
        }

        for name in ["shinobi.json", "shinobi.conf"] {
            let path = dir.path().join(name);
            std::fs::write(&path, FULL).unwrap();
            let config = ShinobiConfig::load(&path).unwrap();
            assert_eq!(config.cameras.len(), 2, "{name}");
        }
    }

    #[test]
    fn load_reads_non_yaml_extension_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shinobi.json");
        std::fs::write(&path, YAML).unwrap();

        let err = ShinobiConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)), "got: {err}");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = ShinobiConfig::load("/nonexistent/shinobi.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert_eq!(path, "/nonexistent/shinobi.json"),
            other => panic!("expected Io, got: {other}"),
        }
    }
}
