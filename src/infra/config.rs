// src/infra/config.rs — Workspace configuration (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub engines: EnginesConfig,

    #[serde(default)]
    pub init: InitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Seconds between automatic state re-probes in the dashboard.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

fn default_refresh_secs() -> u64 {
    2
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnginesConfig {
    /// Engine ids kept out of the registry entirely.
    #[serde(default)]
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitConfig {
    /// Mirror the workspace instructions into engine config dirs at startup.
    #[serde(default = "default_true")]
    pub sync_on_start: bool,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            sync_on_start: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    pub const FILE_NAME: &'static str = "config.toml";

    /// Load config from the workspace root, falling back to defaults
    /// when the file does not exist. A malformed file is an error.
    pub fn load(workspace_root: &Path) -> anyhow::Result<Self> {
        let path = workspace_root.join(Self::FILE_NAME);
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
