use crate::clouds::CloudStore;
use crate::types::{Mode, Theme};
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cloud: CloudConfig,
    #[serde(default)]
    pub explorer: ExplorerConfig,

    /// Where `save` writes; `None` keeps the config in memory only
    #[serde(skip)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Name of the last selected cloud
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub theme: Theme,
    /// Replaces the bundled sample catalog
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        let app_dir = home_dir.join(".config").join("graph-explorer-tui");
        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir.join("config.toml"))
    }

    /// Load config from the default location, or defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };

        config.path = Some(path);
        Ok(config)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Save config to its file. In-memory configs are a no-op.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.explorer.mode = mode;
        self.save()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.explorer.theme = theme;
        self.save()
    }
}

impl CloudStore for Config {
    fn load_cloud_value(&self) -> Option<String> {
        self.cloud.name.clone().filter(|name| !name.is_empty())
    }

    fn store_cloud_value(&mut self, name: &str) -> Result<()> {
        self.cloud.name = Some(name.to_string());
        self.save()
    }
}
