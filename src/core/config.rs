use super::holding::Holding;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

const MARKET_DATA_FILE: &str = "market.yaml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Display currency for every derived value.
    pub currency: String,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    /// Market data file; relative paths resolve against the config file.
    pub market_data: Option<String>,
    pub data_path: Option<String>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "folio", "folio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("io", "folio", "folio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Location of the market data file, falling back to `market.yaml` in the
    /// data directory.
    pub fn market_data_path(&self) -> Result<PathBuf> {
        match &self.market_data {
            Some(path) => {
                let path = PathBuf::from(path);
                match (&self.base_dir, path.is_relative()) {
                    (Some(base), true) => Ok(base.join(path)),
                    _ => Ok(path),
                }
            }
            None => Ok(self.default_data_path()?.join(MARKET_DATA_FILE)),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        debug!(holdings = config.holdings.len(), "Successfully loaded config");
        Ok(config)
    }
}
