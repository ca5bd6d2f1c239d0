use hearth_model::LibraryId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::domains::catalog::catalog_endpoint;

const APP_DIR: &str = "hearth-browser";
const CONFIG_FILE: &str = "config.json";

pub const ENV_SERVER_URL: &str = "HEARTH_SERVER_URL";
pub const ENV_LIBRARY_ID: &str = "HEARTH_LIBRARY_ID";
pub const ENV_BANNER_PATH: &str = "HEARTH_BANNER_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid server URL {url:?}: {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("Banner path must be absolute, got {0:?}")]
    InvalidBannerPath(String),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub server_url: String,
    pub library_id: LibraryId,
    pub banner_path: String,
    pub request_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            library_id: LibraryId::default(),
            banner_path: "/static/banner.jpg".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl BrowserConfig {
    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location, then apply environment overrides
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        };
        config.apply_env_overrides();
        config
    }

    /// Load from a specific file, falling back to defaults when it is
    /// missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<BrowserConfig>(&content)
            {
                Ok(config) => config,
                Err(e) => {
                    log::warn!(
                        "Ignoring invalid config at {}: {}",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Environment variables win over the config file
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(server_url) = lookup(ENV_SERVER_URL) {
            self.server_url = server_url;
        }
        if let Some(raw) = lookup(ENV_LIBRARY_ID) {
            match raw.parse::<LibraryId>() {
                Ok(id) => self.library_id = id,
                Err(e) => log::warn!(
                    "Ignoring {}={:?}: {}",
                    ENV_LIBRARY_ID,
                    raw,
                    e
                ),
            }
        }
        if let Some(banner_path) = lookup(ENV_BANNER_PATH) {
            self.banner_path = banner_path;
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.server_url).map_err(|e| {
            ConfigError::InvalidServerUrl {
                url: self.server_url.clone(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidServerUrl {
                url: self.server_url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        if !self.banner_path.starts_with('/') {
            return Err(ConfigError::InvalidBannerPath(
                self.banner_path.clone(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn catalog_endpoint(&self) -> String {
        catalog_endpoint(self.library_id)
    }
}
