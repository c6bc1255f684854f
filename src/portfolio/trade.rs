//! Immutable trade execution records.

use std::sync::Arc;

use crate::assets::Asset;
use crate::core::time::Day;

/// One execution, immutable once booked.
///
/// `marginal` selects the cash-flow convention: a marginal instrument
/// (options, futures) settles variation margin when the position closes,
/// a non-marginal one (stock) settles the full notional at execution.
#[derive(Debug, Clone)]
pub struct Trade {
    /// Registry key inside a transaction.
    pub id: u64,
    /// Resolved instrument reference.
    pub asset: Arc<Asset>,
    /// Variation-margin settlement flag.
    pub marginal: bool,
    /// Signed quantity; positive buys, negative sells.
    pub amount: f64,
    /// Execution day on the fractional-day clock.
    pub day: Day,
    /// Annual rate at execution.
    pub rate: f64,
    /// Execution price.
    pub price: f64,
    /// Execution fee, always a cost.
    pub fee: f64,
}

impl Trade {
    /// Books a trade against a resolved asset.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        asset: Arc<Asset>,
        marginal: bool,
        amount: f64,
        day: Day,
        rate: f64,
        price: f64,
        fee: f64,
    ) -> Self {
        Self {
            id,
            asset,
            marginal,
            amount,
            day,
            rate,
            price,
            fee,
        }
    }
}
