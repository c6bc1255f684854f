//! Point-in-time market data: the price and margin-rate tables a book is
//! marked against.

use std::collections::BTreeMap;

use crate::core::time::Day;

/// Immutable price/margin-rate table observed at one instant.
///
/// Built through [`MarketSnapshot::builder`] and frozen on `build()`;
/// the portfolio engine only ever reads it.
///
/// # Examples
/// ```
/// use ferrobook::market::MarketSnapshot;
///
/// let snapshot = MarketSnapshot::builder(1, 120.5, 0.02)
///     .price("AU2412", 560.0)
///     .price("AU2412C560", 12.5)
///     .margin("AU2412", 0.08)
///     .build();
/// assert_eq!(snapshot.price_of("AU2412"), Some(560.0));
/// assert_eq!(snapshot.price_of("AG2412"), None);
/// ```
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    /// Registry key inside a transaction.
    pub id: u64,
    /// Observation day on the fractional-day clock.
    pub day: Day,
    /// Prevailing annual rate.
    pub rate: f64,
    /// Price per asset name.
    pub prices: BTreeMap<String, f64>,
    /// Margin rate per asset name.
    pub margins: BTreeMap<String, f64>,
}

impl MarketSnapshot {
    /// Starts a snapshot builder.
    pub fn builder(id: u64, day: Day, rate: f64) -> MarketSnapshotBuilder {
        MarketSnapshotBuilder {
            id,
            day,
            rate,
            prices: BTreeMap::new(),
            margins: BTreeMap::new(),
        }
    }

    /// Price of `name`, when observed.
    pub fn price_of(&self, name: &str) -> Option<f64> {
        self.prices.get(name).copied()
    }

    /// Margin rate of `name`, when observed.
    pub fn margin_of(&self, name: &str) -> Option<f64> {
        self.margins.get(name).copied()
    }
}

/// Accumulates price and margin entries before the snapshot freezes.
#[derive(Debug, Clone)]
pub struct MarketSnapshotBuilder {
    id: u64,
    day: Day,
    rate: f64,
    prices: BTreeMap<String, f64>,
    margins: BTreeMap<String, f64>,
}

impl MarketSnapshotBuilder {
    /// Records the observed price of `name`.
    pub fn price(mut self, name: impl Into<String>, price: f64) -> Self {
        self.prices.insert(name.into(), price);
        self
    }

    /// Records the margin rate of `name`.
    pub fn margin(mut self, name: impl Into<String>, rate: f64) -> Self {
        self.margins.insert(name.into(), rate);
        self
    }

    /// Freezes the snapshot.
    pub fn build(self) -> MarketSnapshot {
        MarketSnapshot {
            id: self.id,
            day: self.day,
            rate: self.rate,
            prices: self.prices,
            margins: self.margins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_distinguish_price_and_margin_tables() {
        let ss = MarketSnapshot::builder(3, 10.0, 0.025)
            .price("CU", 70_000.0)
            .margin("CU", 0.12)
            .price("AL", 19_000.0)
            .build();

        assert_eq!(ss.price_of("CU"), Some(70_000.0));
        assert_eq!(ss.margin_of("CU"), Some(0.12));
        assert_eq!(ss.price_of("AL"), Some(19_000.0));
        assert_eq!(ss.margin_of("AL"), None);
        assert_eq!(ss.id, 3);
    }
}
