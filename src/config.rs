use crate::error::{ConfigError, PortfolioError};
use crate::particles::ParticleConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

/// Runtime configuration, read from JSON. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub animation: ParticleConfig,
    pub show_background: bool,
    pub frame_interval_ms: u64,
    pub default_page: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation: ParticleConfig::default(),
            show_background: true,
            frame_interval_ms: 33,
            default_page: "home".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Platform directories for config and logs.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "portfolio", "portfolio-explorer")
}

impl Config {
    /// Load from `path` if given, else from the platform config dir.
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, PortfolioError> {
        let config = match path {
            Some(p) => Self::from_json(&std::fs::read_to_string(p)?)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::from_json(&std::fs::read_to_string(&p)?)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, PortfolioError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        self.animation.validate()
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
