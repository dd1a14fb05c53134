//! Runtime configuration.
//!
//! ```toml
//! backend_url = "http://localhost:8000"
//! timeout_secs = 10
//!
//! [surface]
//! width = 800
//! height = 400
//! padding = 40
//! ```
//!
//! Every key is optional. `CALCPLOT_BACKEND_URL` overrides `backend_url`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::transform::Surface;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const BACKEND_URL_ENV: &str = "CALCPLOT_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub timeout_secs: u64,
    pub surface: Surface,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            surface: Surface::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces the backend url unless `url` is absent or blank.
    pub fn with_backend_url(self, url: Option<String>) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => Self {
                backend_url: url.trim().to_string(),
                ..self
            },
            _ => self,
        }
    }

    /// Applies the `CALCPLOT_BACKEND_URL` override, if set.
    pub fn with_env(self) -> Self {
        self.with_backend_url(std::env::var(BACKEND_URL_ENV).ok())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.trim().is_empty() {
            return Err(ConfigError::EmptyBackendUrl);
        }
        self.surface.validate()
    }
}
