//! Tracker configuration stored as RON.
//!
//! A missing default file means defaults; an explicitly requested file must
//! exist and parse.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracker_engine::ApiSettings;
use tracker_logging::{tracker_info, tracker_warn};

pub const DEFAULT_CONFIG_FILENAME: &str = "tracker.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    /// How long one-shot mode waits for outstanding requests.
    pub wait_timeout_secs: u64,
    pub saved_searches_page: String,
    pub data_sources_page: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            max_response_bytes: api.max_bytes,
            wait_timeout_secs: 60,
            saved_searches_page: "/savedsearches".to_string(),
            data_sources_page: "/datasources".to_string(),
        }
    }
}

/// Targets of the two navigation anchors on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinks {
    pub saved_searches: String,
    pub data_sources: String,
}

impl Default for NavLinks {
    fn default() -> Self {
        TrackerConfig::default().nav_links()
    }
}

impl TrackerConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn nav_links(&self) -> NavLinks {
        NavLinks {
            saved_searches: self.saved_searches_page.clone(),
            data_sources: self.data_sources_page.clone(),
        }
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new();
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }
}

/// Reads a config file; `Ok(None)` when it does not exist.
pub fn read_config(path: &Path) -> Result<Option<TrackerConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracker_info!("Loaded config from {:?}", path);
    Ok(Some(config))
}

/// Resolves the effective config.
///
/// With an explicit path the file must exist and parse. Without one,
/// `./tracker.ron` is used when present and problems fall back to defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<TrackerConfig, ConfigError> {
    resolve_config_in(explicit, Path::new(DEFAULT_CONFIG_FILENAME))
}

fn resolve_config_in(
    explicit: Option<&Path>,
    default_path: &Path,
) -> Result<TrackerConfig, ConfigError> {
    if let Some(path) = explicit {
        return match read_config(path)? {
            Some(config) => Ok(config),
            None => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
        };
    }

    match read_config(default_path) {
        Ok(config) => Ok(config.unwrap_or_default()),
        Err(err) => {
            tracker_warn!("{}; using defaults", err);
            Ok(TrackerConfig::default())
        }
    }
}
