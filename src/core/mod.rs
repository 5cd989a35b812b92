//! Valuation engine and its supporting types

pub mod allocation;
pub mod config;
pub mod currency;
pub mod error;
pub mod holding;
pub mod log;
pub mod market;
pub mod portfolio;
pub mod timeline;
pub mod valuation;

// Re-export main types for cleaner imports
pub use allocation::{Allocation, aggregate};
pub use currency::{RateTable, convert};
pub use error::ValidationError;
pub use holding::{AssetCategory, Holding};
pub use market::{MarketData, MarketDataProvider, MarketQuotes, Quote, TimelinePoint};
pub use portfolio::PortfolioReport;
pub use timeline::{Snapshot, reconstruct};
pub use valuation::{ValuedHolding, valuate, valuate_all};
