use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");
const EXAMPLE_MARKET: &str = include_str!("../../docs/example_market.yaml");

/// Creates a default configuration file with example content at the default location
pub fn setup() -> Result<()> {
    let path = AppConfig::default_config_path()?;
    setup_at_path(path)
}

/// Creates a default configuration file, plus example market data next to it
/// when none exists, at the specified path
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;
    tracing::info!("Created default configuration at {}", path.display());

    let market_path = AppConfig::load_from_path(path)?.market_data_path()?;
    if !market_path.exists() {
        std::fs::write(&market_path, EXAMPLE_MARKET).with_context(|| {
            format!("Failed to write market data to {}", market_path.display())
        })?;
        tracing::info!("Created example market data at {}", market_path.display());
    }
    Ok(())
}
