use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Client configuration, persisted as JSON under a fixed path. Every command
/// other than `configure` refuses to run without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl TrackerConfig {
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "btc-tracker")
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// Returns `None` when no configuration has been saved yet.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load() -> anyhow::Result<Option<Self>> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::default_path()?)
    }
}
