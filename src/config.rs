use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Start a preview edit from the resume's current value instead of the form's.
    pub seed_edits: bool,
    /// Default filter when RUST_LOG is unset.
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_edits: true,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load from `path`, or the default location. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path(),
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = project_dirs() {
            proj_dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("resume-builder.json")
        }
    }

    pub fn log_path(&self) -> PathBuf {
        if let Some(path) = &self.log_file {
            return path.clone();
        }
        if let Some(proj_dirs) = project_dirs() {
            proj_dirs.data_dir().join("resume-builder.log")
        } else {
            PathBuf::from("resume-builder.log")
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "resume-builder")
}
