//! Market data consumed by the engine: quotes, rates and sparse price history.

use super::currency::{DEFAULT_ANCHOR, RateTable};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Latest known native price of a holding and the currency it is quoted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub currency: String,
}

impl Quote {
    pub fn new(price: f64, currency: &str) -> Self {
        Self {
            price,
            currency: currency.to_string(),
        }
    }
}

/// Holding id to its latest quote.
pub type MarketQuotes = HashMap<String, Quote>;

/// Native prices sampled around one instant. Only assets that had a sample
/// are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Epoch seconds.
    pub timestamp: i64,
    #[serde(default)]
    pub assets: HashMap<String, f64>,
}

impl TimelinePoint {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            assets: HashMap::new(),
        }
    }

    pub fn with_sample(mut self, id: impl Into<String>, price: f64) -> Self {
        self.assets.insert(id.into(), price);
        self
    }
}

fn default_anchor() -> String {
    DEFAULT_ANCHOR.to_string()
}

/// Everything upstream collaborators hand to a valuation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(default = "default_anchor")]
    pub anchor: String,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
    #[serde(default)]
    pub quotes: MarketQuotes,
    /// Ascending by timestamp.
    #[serde(default)]
    pub timeline: Vec<TimelinePoint>,
}

impl MarketData {
    pub fn rate_table(&self) -> RateTable {
        RateTable::new(&self.anchor, self.rates.clone())
    }
}

impl Default for MarketData {
    fn default() -> Self {
        Self {
            anchor: default_anchor(),
            rates: HashMap::new(),
            quotes: HashMap::new(),
            timeline: Vec::new(),
        }
    }
}

/// Source of market data for a valuation pass. Implementations own all I/O;
/// the engine only sees the returned snapshot.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_market_data(&self) -> Result<MarketData>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_data_deserialization() {
        let yaml = r#"
rates:
  USD: 1
  TWD: 32
quotes:
  a:
    price: 5
    currency: "USD"
timeline:
  - timestamp: 1704067200
    assets:
      a: 5
  - timestamp: 1704153600
"#;
        let data: MarketData = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(data.anchor, "USD");
        assert_eq!(data.quotes["a"], Quote::new(5.0, "USD"));
        assert_eq!(data.timeline.len(), 2);
        assert_eq!(data.timeline[0].assets["a"], 5.0);
        assert!(data.timeline[1].assets.is_empty());
        assert_eq!(data.rate_table().rate("TWD"), 32.0);
    }

    #[test]
    fn test_market_data_from_json() {
        let json = r#"{"anchor": "EUR", "rates": {"USD": 1.1}}"#;
        let data: MarketData = serde_json::from_str(json).unwrap();
        let rates = data.rate_table();
        assert_eq!(rates.anchor(), "EUR");
        assert_eq!(rates.rate("EUR"), 1.0);
        assert!(data.quotes.is_empty());
        assert!(data.timeline.is_empty());
    }
}
