//! Explorer configuration.
//!
//! Loaded from YAML; every field has a default so a partial (or absent)
//! file is valid.

use crate::errors::ConfigError;
use crate::state::Theme;
use atscope_identity::DirectoryConfig;
use atscope_render::{RenderOptions, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "ATSCOPE_CONFIG";

/// Top-level configuration for the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// PLC directory base URL.
    pub plc_directory: String,
    /// Service answering handle resolution queries.
    pub handle_resolver: String,
    /// Image CDN base URL.
    pub cdn_base: String,
    /// Video streaming base URL.
    pub video_base: String,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
    /// Depth ceiling for rendering nested values.
    pub max_depth: usize,
    /// Initial theme.
    pub theme: Theme,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        let directory = DirectoryConfig::default();
        let render = RenderOptions::default();
        Self {
            plc_directory: directory.plc_directory,
            handle_resolver: directory.handle_resolver,
            cdn_base: render.cdn_base,
            video_base: render.video_base,
            timeout_secs: directory.timeout_secs,
            max_depth: DEFAULT_MAX_DEPTH,
            theme: Theme::default(),
        }
    }
}

impl ExplorerConfig {
    /// Parses a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reads a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Loads from `explicit`, else from `$ATSCOPE_CONFIG`, else defaults.
    ///
    /// An explicit path must exist. A path taken from the environment that
    /// does not exist falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::from_file(&path)
            }
            Some(path) => {
                tracing::debug!(path = %path.display(), "configuration file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Settings for the identity directory.
    pub fn directory_config(&self) -> DirectoryConfig {
        DirectoryConfig {
            plc_directory: self.plc_directory.clone(),
            handle_resolver: self.handle_resolver.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Settings for the value renderer.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            cdn_base: self.cdn_base.clone(),
            video_base: self.video_base.clone(),
            max_depth: self.max_depth,
        }
    }
}
