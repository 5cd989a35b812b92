use crate::core::market::{MarketData, MarketDataProvider};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Reads market data exported by an upstream fetcher. `.json` files are parsed
/// as JSON, anything else as YAML.
pub struct FileMarketDataProvider {
    path: PathBuf,
}

impl FileMarketDataProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

#[async_trait]
impl MarketDataProvider for FileMarketDataProvider {
    async fn fetch_market_data(&self) -> Result<MarketData> {
        debug!(path = %self.path.display(), "Reading market data");
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read market data: {}", self.path.display()))?;

        let parsed = if self.is_json() {
            serde_json::from_str::<MarketData>(&content).map_err(anyhow::Error::from)
        } else {
            serde_yaml::from_str::<MarketData>(&content).map_err(anyhow::Error::from)
        };

        match parsed {
            Ok(data) => {
                debug!(
                    rates = data.rates.len(),
                    quotes = data.quotes.len(),
                    points = data.timeline.len(),
                    "Loaded market data"
                );
                Ok(data)
            }
            Err(e) => {
                error!(error = ?e, path = %self.path.display(), "Failed to parse market data");
                Err(e).with_context(|| {
                    format!("Failed to parse market data: {}", self.path.display())
                })
            }
        }
    }
}
