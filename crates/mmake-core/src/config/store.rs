//! Config store for loading and saving mmake.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{MmakeConfig, parser};

pub const CONFIG_FILE_NAME: &str = "mmake.toml";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store for `~/.config/mmake/mmake.toml`.
    pub fn global() -> anyhow::Result<Self> {
        let global_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("mmake");

        Ok(Self::from_dir(global_dir))
    }

    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self::from_path(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    pub fn from_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> anyhow::Result<MmakeConfig> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(MmakeConfig::new());
        }
        parser::parse_mmake_toml(&self.config_path)
    }

    pub fn save(&self, config: &MmakeConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}
