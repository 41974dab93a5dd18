//! Dashboard configuration — backend URL and generation form defaults.
//!
//! User-level config: `~/.flowdeck/config.yaml`
//! Project-level config: `.flowdeck/config.yaml` (overrides keys it sets)
//!
//! Resolution: built-in defaults → user file → project file → env vars
//! (`FLOWDECK_URL`, `FLOWDECK_MODEL`, `FLOWDECK_TEMPERATURE`). CLI flags are
//! applied last by `main`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::Model;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Project-level config file, relative to the working directory.
pub const PROJECT_CONFIG: &str = ".flowdeck/config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub default_model: Model,
    pub default_temperature: f64,
}

/// On-disk shape. Every key is optional so files can override piecemeal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_model: Option<Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_temperature: Option<f64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            default_model: Model::OpenAi,
            default_temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Path to `~/.flowdeck/config.yaml`.
fn user_config_path() -> Option<PathBuf> {
    #[cfg(windows)]
    let home = std::env::var("USERPROFILE").ok();
    #[cfg(not(windows))]
    let home = std::env::var("HOME").ok();
    home.map(|p| PathBuf::from(p).join(".flowdeck").join("config.yaml"))
}

impl DashboardConfig {
    /// Load from the user + project files, then apply env overrides.
    pub fn load() -> Self {
        let mut config = Self::load_from(user_config_path().as_deref(), Path::new(PROJECT_CONFIG));
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Load from explicit file paths (no env).
    pub fn load_from(user: Option<&Path>, project: &Path) -> Self {
        let mut config = Self::default();
        if let Some(path) = user {
            if let Some(file) = read_file(path) {
                config.merge(file);
            }
        }
        if let Some(file) = read_file(project) {
            config.merge(file);
        }
        config
    }

    fn merge(&mut self, file: ConfigFile) {
        if let Some(url) = file.base_url {
            self.base_url = url;
        }
        if let Some(model) = file.default_model {
            self.default_model = model;
        }
        if let Some(t) = file.default_temperature {
            self.set_temperature(t);
        }
    }

    /// Apply env-style overrides through `lookup`. Unparseable values are
    /// logged and skipped.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("FLOWDECK_URL").filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(raw) = lookup("FLOWDECK_MODEL") {
            match raw.parse::<Model>() {
                Ok(model) => self.default_model = model,
                Err(e) => warn!("ignoring FLOWDECK_MODEL: {e}"),
            }
        }
        if let Some(raw) = lookup("FLOWDECK_TEMPERATURE") {
            match raw.trim().parse::<f64>() {
                Ok(t) => self.set_temperature(t),
                Err(_) => warn!("ignoring FLOWDECK_TEMPERATURE: not a number: '{raw}'"),
            }
        }
    }

    /// Set the default temperature, clamped to the slider range.
    pub fn set_temperature(&mut self, t: f64) {
        self.default_temperature = if t.is_finite() {
            t.clamp(0.0, 1.0)
        } else {
            DEFAULT_TEMPERATURE
        };
    }

    /// Write the project-level file under `root`.
    pub fn save_project(&self, root: &Path) -> Result<PathBuf, ConfigError> {
        let path = root.join(PROJECT_CONFIG);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let file = ConfigFile {
            base_url: Some(self.base_url.clone()),
            default_model: Some(self.default_model),
            default_temperature: Some(self.default_temperature),
        };
        let yaml = serde_yaml::to_string(&file)?;
        std::fs::write(&path, yaml).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn read_file(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_yaml::from_str(&content) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!("ignoring malformed config {}: {e}", path.display());
            None
        }
    }
}
