//! One full valuation pass over a portfolio.

use super::allocation::{Allocation, aggregate};
use super::currency::normalize_currency_code;
use super::error::ValidationError;
use super::holding::{AssetCategory, Holding, validate_holdings};
use super::market::MarketData;
use super::timeline::{Snapshot, reconstruct};
use super::valuation::{ValuedHolding, valuate_all};
use serde::Serialize;
use tracing::debug;

/// Everything the presentation layer renders, derived from one immutable set
/// of inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    pub display_currency: String,
    pub holdings: Vec<ValuedHolding>,
    pub allocation: Allocation,
    pub history: Vec<Snapshot>,
}

impl PortfolioReport {
    /// Validates `holdings`, then rebuilds history, current valuations and the
    /// current allocation.
    pub fn evaluate(
        holdings: &[Holding],
        market: &MarketData,
        display_currency: &str,
    ) -> Result<Self, ValidationError> {
        validate_holdings(holdings)?;

        for holding in holdings {
            if let AssetCategory::Custom(name) = &holding.category {
                debug!(
                    id = %holding.id,
                    category = %name,
                    "Valuing custom category at face value"
                );
            }
        }

        let display_currency = normalize_currency_code(display_currency);
        let rates = market.rate_table();
        if !rates.contains(&display_currency) {
            debug!(currency = %display_currency, "Display currency missing from rate table");
        }

        let history = reconstruct(
            &market.timeline,
            holdings,
            &market.quotes,
            &rates,
            &display_currency,
        );
        let valued = valuate_all(holdings, &market.quotes, &rates, &display_currency, &history);
        let allocation = aggregate(&valued);

        Ok(Self {
            display_currency,
            holdings: valued,
            allocation,
            history,
        })
    }

    /// Share of the current total held by a holding, in percent.
    pub fn weight(&self, id: &str) -> Option<f64> {
        if self.allocation.total_value <= 0.0 {
            return None;
        }
        self.holdings
            .iter()
            .find(|v| v.holding.id == id)
            .map(|v| v.value / self.allocation.total_value * 100.0)
    }

    pub fn total_day_change(&self) -> f64 {
        self.holdings.iter().map(|v| v.day_change).sum()
    }

    /// The latest snapshot at or before `timestamp`.
    pub fn snapshot_at(&self, timestamp: i64) -> Option<&Snapshot> {
        self.history
            .iter()
            .rev()
            .find(|snapshot| snapshot.timestamp <= timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::market::{Quote, TimelinePoint};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    const JAN_1: i64 = 1_704_067_200;
    const DAY: i64 = 86_400;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn market() -> MarketData {
        MarketData {
            anchor: "USD".to_string(),
            rates: HashMap::from([("USD".to_string(), 1.0), ("TWD".to_string(), 32.0)]),
            quotes: HashMap::from([("a".to_string(), Quote::new(5.0, "USD"))]),
            timeline: vec![
                TimelinePoint::new(JAN_1).with_sample("a", 4.0),
                TimelinePoint::new(JAN_1 + DAY).with_sample("a", 5.0),
            ],
        }
    }

    #[test]
    fn test_evaluate_full_pass() {
        let holdings = vec![
            Holding::new("a", AssetCategory::Equity, 10.0, "TWD", date(2024, 1, 1)),
            Holding::new("b", AssetCategory::Bank, 400.0, "TWD", date(2023, 1, 1)),
        ];
        let report = PortfolioReport::evaluate(&holdings, &market(), "twd").unwrap();

        assert_eq!(report.display_currency, "TWD");
        assert_eq!(report.holdings[0].value, 1600.0);
        assert_eq!(report.holdings[1].value, 400.0);
        assert_eq!(report.allocation.total_value, 2000.0);
        assert_eq!(report.allocation.per_category[&AssetCategory::Equity], 1600.0);
        assert_eq!(report.history.len(), 2);
        assert_eq!(report.history[0].total_value, 1280.0 + 400.0);
        assert_eq!(report.holdings[0].day_change, 320.0);
        assert_eq!(report.total_day_change(), 320.0);
        assert_eq!(report.weight("a"), Some(80.0));
        assert_eq!(report.weight("missing"), None);
    }

    #[test]
    fn test_evaluate_rejects_negative_amount() {
        let holdings = vec![Holding::new(
            "a",
            AssetCategory::Equity,
            -1.0,
            "USD",
            date(2024, 1, 1),
        )];
        let err = PortfolioReport::evaluate(&holdings, &market(), "USD").unwrap_err();
        assert!(matches!(err, ValidationError::NegativeAmount { .. }));
    }

    #[test]
    fn test_evaluate_empty_portfolio() {
        let report = PortfolioReport::evaluate(&[], &market(), "USD").unwrap();
        assert!(report.holdings.is_empty());
        assert!(report.allocation.is_empty());
        assert_eq!(report.allocation.total_value, 0.0);
        assert_eq!(report.history.len(), 2);
        assert!(report.history.iter().all(|s| s.contributions.is_empty()));
    }

    #[test]
    fn test_snapshot_at() {
        let holdings = vec![Holding::new(
            "a",
            AssetCategory::Equity,
            1.0,
            "USD",
            date(2024, 1, 1),
        )];
        let report = PortfolioReport::evaluate(&holdings, &market(), "USD").unwrap();

        assert!(report.snapshot_at(JAN_1 - 1).is_none());
        assert_eq!(report.snapshot_at(JAN_1).unwrap().total_value, 4.0);
        assert_eq!(report.snapshot_at(JAN_1 + DAY / 2).unwrap().total_value, 4.0);
        assert_eq!(report.snapshot_at(i64::MAX).unwrap().total_value, 5.0);
    }

    #[test]
    fn test_allocation_sum_invariant_everywhere() {
        let holdings = vec![
            Holding::new("a", AssetCategory::Equity, 3.0, "USD", date(2024, 1, 1)),
            Holding::new("b", AssetCategory::Savings, 123.45, "TWD", date(2023, 1, 1)),
            Holding::new("c", AssetCategory::Crypto, 0.1, "USD", date(2023, 1, 1)),
        ];
        let mut market = market();
        market.quotes.insert("c".to_string(), Quote::new(61_234.5, "USD"));
        market.timeline[1].assets.insert("c".to_string(), 61_000.0);
        let report = PortfolioReport::evaluate(&holdings, &market, "TWD").unwrap();

        let current: f64 = report.allocation.per_category.values().sum();
        assert!((current - report.allocation.total_value).abs() < 1e-6);
        for snapshot in &report.history {
            let sum: f64 = snapshot.per_category.values().sum();
            assert!((sum - snapshot.total_value).abs() < 1e-6);
            let historical = Allocation::from_snapshot(snapshot);
            let sum: f64 = historical.per_category.values().sum();
            assert!((sum - historical.total_value).abs() < 1e-6);
        }
    }
}
