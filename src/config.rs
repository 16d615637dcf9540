use crate::sort::SortPolicy;
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const SOURCE_ENV: &str = "CATALOG_SOURCE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("Could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("org", "shipoffools", "catalog-explorer").ok_or(ConfigError::NoHomeDirectory)
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL or directory holding `<category>.json`.
    pub source: String,
    pub sort_policy: SortPolicy,
    /// Base path of the price icon assets in rendered pages.
    pub asset_base: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: "./json".to_string(),
            sort_policy: SortPolicy::default(),
            asset_base: "./assets".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl CatalogConfig {
    /// Load from `path`, or from the user config directory when no path is
    /// given. A missing default file yields the defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (project_dirs()?.config_dir().join("config.json"), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Apply command-line and environment overrides. Flags win over the
    /// environment, which wins over the file.
    pub fn with_overrides(
        mut self,
        source: Option<String>,
        env_source: Option<String>,
        sort_policy: Option<SortPolicy>,
    ) -> Self {
        if let Some(s) = source.or(env_source) {
            self.source = s;
        }
        if let Some(p) = sort_policy {
            self.sort_policy = p;
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
