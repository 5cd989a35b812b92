//! Current valuation of individual holdings in the display currency.
use super::currency::{RateTable, convert};
use super::holding::Holding;
use super::market::MarketQuotes;
use super::timeline::Snapshot;
use serde::Serialize;
use tracing::debug;

/// A holding priced in the display currency. Rebuilt on every pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuedHolding {
    #[serde(flatten)]
    pub holding: Holding,
    /// Total value of the position.
    pub value: f64,
    /// Value of one unit: one share for market holdings, one unit of the
    /// settlement currency otherwise.
    pub price: f64,
    pub day_change: f64,
    pub day_change_percent: f64,
}

/// Currency the holding's market price is quoted in, defaulting to the anchor.
pub(crate) fn native_currency<'a>(
    holding: &Holding,
    quotes: &'a MarketQuotes,
    rates: &'a RateTable,
) -> &'a str {
    quotes
        .get(&holding.id)
        .map_or(rates.anchor(), |quote| quote.currency.as_str())
}

/// Value of a position given a native unit price.
///
/// Market holdings multiply units by the converted price; face-value holdings
/// convert their balance and ignore `unit_price`.
pub(crate) fn position_value(
    holding: &Holding,
    unit_price: f64,
    price_currency: &str,
    rates: &RateTable,
    display_currency: &str,
) -> f64 {
    if holding.category.is_market_priced() {
        holding.amount * convert(unit_price, price_currency, display_currency, rates)
    } else {
        convert(holding.amount, &holding.currency, display_currency, rates)
    }
}

/// Prices a single holding. `tail` is the final `(previous, last)` pair of the
/// dense timeline, if it has at least two points.
pub fn valuate(
    holding: &Holding,
    quotes: &MarketQuotes,
    rates: &RateTable,
    display_currency: &str,
    tail: Option<(&Snapshot, &Snapshot)>,
) -> ValuedHolding {
    if !holding.category.is_market_priced() {
        return ValuedHolding {
            holding: holding.clone(),
            value: position_value(holding, 1.0, &holding.currency, rates, display_currency),
            price: convert(1.0, &holding.currency, display_currency, rates),
            day_change: 0.0,
            day_change_percent: 0.0,
        };
    }

    let native_price = match quotes.get(&holding.id) {
        Some(quote) => quote.price,
        None => {
            debug!(id = %holding.id, "No quote for holding, pricing at 0");
            0.0
        }
    };
    let currency = native_currency(holding, quotes, rates);
    let (day_change, day_change_percent) =
        day_change(holding, currency, rates, display_currency, tail);

    ValuedHolding {
        holding: holding.clone(),
        value: position_value(holding, native_price, currency, rates, display_currency),
        price: convert(native_price, currency, display_currency, rates),
        day_change,
        day_change_percent,
    }
}

fn day_change(
    holding: &Holding,
    currency: &str,
    rates: &RateTable,
    display_currency: &str,
    tail: Option<(&Snapshot, &Snapshot)>,
) -> (f64, f64) {
    let Some((prev, last)) = tail else {
        return (0.0, 0.0);
    };
    let (Some(prev_price), Some(last_price)) =
        (prev.prices.get(&holding.id), last.prices.get(&holding.id))
    else {
        return (0.0, 0.0);
    };

    let delta = last_price - prev_price;
    let change = holding.amount * convert(delta, currency, display_currency, rates);
    let percent = if *prev_price == 0.0 {
        0.0
    } else {
        delta / prev_price * 100.0
    };
    (change, percent)
}

/// Values every holding, using the last two snapshots of `history` for day
/// change.
pub fn valuate_all(
    holdings: &[Holding],
    quotes: &MarketQuotes,
    rates: &RateTable,
    display_currency: &str,
    history: &[Snapshot],
) -> Vec<ValuedHolding> {
    let tail = match history {
        [.., prev, last] => Some((prev, last)),
        _ => None,
    };
    holdings
        .iter()
        .map(|holding| valuate(holding, quotes, rates, display_currency, tail))
        .collect()
}
