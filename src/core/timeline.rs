//! Dense portfolio history rebuilt from sparse per-asset price samples.

use super::currency::RateTable;
use super::holding::{AssetCategory, Holding};
use super::market::{MarketQuotes, TimelinePoint};
use super::valuation::{native_currency, position_value};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Portfolio value at one point of the input timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub timestamp: i64,
    pub total_value: f64,
    pub per_category: BTreeMap<AssetCategory, f64>,
    /// Display-currency value per holding, for every holding with a defined
    /// contribution at this point. Holdings gated by acquisition date are
    /// present with 0.
    pub contributions: BTreeMap<String, f64>,
    /// Forward-filled native price per market-priced holding.
    pub prices: BTreeMap<String, f64>,
}

impl Snapshot {
    fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            total_value: 0.0,
            per_category: BTreeMap::new(),
            contributions: BTreeMap::new(),
            prices: BTreeMap::new(),
        }
    }

    fn add(&mut self, holding: &Holding, value: f64) {
        self.total_value += value;
        *self
            .per_category
            .entry(holding.category.clone())
            .or_insert(0.0) += value;
        self.contributions.insert(holding.id.clone(), value);
    }

    pub fn contribution(&self, id: &str) -> Option<f64> {
        self.contributions.get(id).copied()
    }
}

/// Rebuilds one snapshot per point of `timeline`, in input order.
///
/// Market-priced holdings carry their last observed price forward across
/// points and contribute nothing until their first sample. Face-value holdings
/// are worth their balance at every point. Any holding contributes 0 before
/// midnight UTC of its acquisition date.
pub fn reconstruct(
    timeline: &[TimelinePoint],
    holdings: &[Holding],
    quotes: &MarketQuotes,
    rates: &RateTable,
    display_currency: &str,
) -> Vec<Snapshot> {
    if timeline.windows(2).any(|w| w[0].timestamp > w[1].timestamp) {
        warn!("Timeline is not in ascending timestamp order; forward-fill follows input order");
    }

    let mut last_known: HashMap<&str, f64> = HashMap::new();

    timeline
        .iter()
        .map(|point| {
            let mut snapshot = Snapshot::new(point.timestamp);

            for holding in holdings {
                let value = if holding.category.is_market_priced() {
                    if let Some(price) = point.assets.get(&holding.id) {
                        last_known.insert(holding.id.as_str(), *price);
                    }
                    let Some(price) = last_known.get(holding.id.as_str()).copied() else {
                        continue;
                    };
                    snapshot.prices.insert(holding.id.clone(), price);
                    let currency = native_currency(holding, quotes, rates);
                    position_value(holding, price, currency, rates, display_currency)
                } else {
                    position_value(holding, 1.0, &holding.currency, rates, display_currency)
                };

                if point.timestamp < holding.acquired_at() {
                    snapshot.add(holding, 0.0);
                } else {
                    snapshot.add(holding, value);
                }
            }

            debug!(
                timestamp = point.timestamp,
                total = snapshot.total_value,
                "Reconstructed snapshot"
            );
            snapshot
        })
        .collect()
}
