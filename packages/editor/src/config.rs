use crate::model::DeviceView;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "pagewright.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of history entries (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default)]
    pub default_device: DeviceView,

    /// Appended to the label of duplicated components and page titles
    #[serde(default = "default_copy_suffix")]
    pub copy_suffix: String,

    /// Appended to the label of pasted components
    #[serde(default = "default_paste_suffix")]
    pub paste_suffix: String,

    /// Appended to the slug of duplicated pages
    #[serde(default = "default_slug_copy_suffix")]
    pub slug_copy_suffix: String,

    /// Prefix for generated component ids
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
}

fn default_history_limit() -> usize {
    100
}

fn default_copy_suffix() -> String {
    " (copy)".to_string()
}

fn default_paste_suffix() -> String {
    " (pasted)".to_string()
}

fn default_slug_copy_suffix() -> String {
    "-copy".to_string()
}

fn default_id_prefix() -> String {
    "comp".to_string()
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            default_device: DeviceView::default(),
            copy_suffix: default_copy_suffix(),
            paste_suffix: default_paste_suffix(),
            slug_copy_suffix: default_slug_copy_suffix(),
            id_prefix: default_id_prefix(),
        }
    }
}
