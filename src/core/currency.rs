//! Currency conversion over a table of anchor-relative rates.
//!
//! Every cross rate in the crate is derived here, so two components valuing
//! the same amount can never disagree.

use std::collections::HashMap;
use tracing::{debug, warn};

pub const DEFAULT_ANCHOR: &str = "USD";

/// Canonical form of a currency code: trimmed and upper-cased.
pub fn normalize_currency_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Exchange rates expressed against a single anchor currency
/// (1 unit of anchor = `rate` units of the currency).
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    anchor: String,
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// Builds a table, dropping unusable entries and pinning the anchor to 1.
    pub fn new(anchor: &str, rates: HashMap<String, f64>) -> Self {
        let anchor = normalize_currency_code(anchor);
        let mut table = HashMap::with_capacity(rates.len() + 1);
        for (code, rate) in rates {
            let code = normalize_currency_code(&code);
            if !rate.is_finite() || rate <= 0.0 {
                warn!(currency = %code, rate, "Ignoring unusable exchange rate");
                continue;
            }
            table.insert(code, rate);
        }
        if let Some(rate) = table.insert(anchor.clone(), 1.0) {
            if rate != 1.0 {
                warn!(anchor = %anchor, rate, "Anchor rate overridden to 1");
            }
        }
        Self {
            anchor,
            rates: table,
        }
    }

    /// A table holding only the anchor.
    pub fn anchored(anchor: &str) -> Self {
        Self::new(anchor, HashMap::new())
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(&normalize_currency_code(code))
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Rate of `code` against the anchor, or 1 when the table has no entry.
    pub fn rate(&self, code: &str) -> f64 {
        let code = normalize_currency_code(code);
        match self.rates.get(&code) {
            Some(rate) => *rate,
            None => {
                debug!(currency = %code, "Exchange rate missing, falling back to 1");
                1.0
            }
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::anchored(DEFAULT_ANCHOR)
    }
}

/// Converts `amount` denominated in `from` into `to`.
///
/// Never fails: a currency missing from `rates` is priced at 1 anchor unit.
pub fn convert(amount: f64, from: &str, to: &str, rates: &RateTable) -> f64 {
    if from.trim().eq_ignore_ascii_case(to.trim()) {
        return amount;
    }
    amount * (rates.rate(to) / rates.rate(from))
}
