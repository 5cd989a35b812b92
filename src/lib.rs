pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::core::{MarketDataProvider, PortfolioReport};
use anyhow::{Context, Result};
use tracing::{debug, info};

pub enum AppCommand {
    Summary,
    /// Allocation now, or at the latest snapshot at or before a timestamp.
    Alloc { at: Option<i64> },
    History,
}

#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Overrides the configured display currency.
    pub currency: Option<String>,
    /// Emit the command's data as JSON instead of a table.
    pub json: bool,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    options: &RunOptions,
) -> Result<()> {
    info!("folio starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let market_path = config.market_data_path()?;
    let provider = providers::FileMarketDataProvider::new(market_path);
    let market = provider.fetch_market_data().await?;

    let display_currency = options.currency.as_deref().unwrap_or(&config.currency);
    let report = PortfolioReport::evaluate(&config.holdings, &market, display_currency)
        .context("Invalid holdings in configuration")?;

    match command {
        AppCommand::Summary => cli::summary::run(&report, options.json),
        AppCommand::Alloc { at } => cli::alloc::run(&report, at, options.json),
        AppCommand::History => cli::history::run(&report, options.json),
    }
}
