use super::holding::AssetCategory;
use super::timeline::Snapshot;
use super::valuation::ValuedHolding;
use serde::Serialize;
use std::collections::BTreeMap;

/// Value per category at a single point in time, in the display currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Allocation {
    /// Only categories holding a positive value.
    pub per_category: BTreeMap<AssetCategory, f64>,
    pub total_value: f64,
}

impl Allocation {
    fn from_category_values(values: BTreeMap<AssetCategory, f64>, total_value: f64) -> Self {
        Self {
            per_category: values.into_iter().filter(|(_, v)| *v > 0.0).collect(),
            total_value,
        }
    }

    /// Allocation of a historical point.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::from_category_values(snapshot.per_category.clone(), snapshot.total_value)
    }

    pub fn is_empty(&self) -> bool {
        self.per_category.is_empty()
    }

    /// Share of the total per category, in percent. Empty when the total is 0.
    pub fn weights(&self) -> BTreeMap<AssetCategory, f64> {
        if self.total_value <= 0.0 {
            return BTreeMap::new();
        }
        self.per_category
            .iter()
            .map(|(category, value)| (category.clone(), value / self.total_value * 100.0))
            .collect()
    }
}

/// Sums valued holdings by category.
pub fn aggregate(valued: &[ValuedHolding]) -> Allocation {
    let mut values: BTreeMap<AssetCategory, f64> = BTreeMap::new();
    let mut total_value = 0.0;
    for holding in valued {
        *values.entry(holding.holding.category.clone()).or_insert(0.0) += holding.value;
        total_value += holding.value;
    }
    Allocation::from_category_values(values, total_value)
}
