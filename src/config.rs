use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bank::DEFAULT_BANK;
use crate::countdown::DEFAULT_PREVIEW_SECS;
use crate::error::ConfigError;
use crate::session::{RevealMode, DEFAULT_CARDS};

/// Used when no password is configured. Anyone reading the source knows it.
pub const FALLBACK_SECRET: &str = "teacher";

pub const SECRET_ENV: &str = "FLIPQUIZ_PASSWORD";

/// Persisted preferences. The password is never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub cards: usize,
    pub bank: String,
    pub preview_secs: Option<u32>,
    pub reveal: RevealMode,
    pub wall_of_shame: bool,
    pub require_password: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cards: DEFAULT_CARDS,
            bank: DEFAULT_BANK.to_string(),
            preview_secs: Some(DEFAULT_PREVIEW_SECS),
            reveal: RevealMode::default(),
            wall_of_shame: true,
            require_password: true,
        }
    }
}

/// The password the gate compares against, and whether it came from the
/// built-in fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    pub value: String,
    pub is_fallback: bool,
}

impl Secret {
    /// Blank or missing values fall back to [`FALLBACK_SECRET`].
    pub fn resolve(configured: Option<&str>) -> Self {
        match configured {
            Some(value) if !value.is_empty() => Self {
                value: value.to_string(),
                is_fallback: false,
            },
            _ => {
                tracing::warn!(
                    "no password configured via --password or {SECRET_ENV}, using the built-in default"
                );
                Self {
                    value: FALLBACK_SECRET.to_string(),
                    is_fallback: true,
                }
            }
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "flipquiz") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("flipquiz_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring malformed config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
