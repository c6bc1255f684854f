//! Running net positions and their mark-to-market state.

use std::sync::Arc;

use crate::assets::AssetKind;
use crate::core::time::{years_to_maturity, Day};
use crate::pricing::greeks;
use crate::portfolio::book::ModelTable;
use crate::portfolio::trade::Trade;
use crate::vol::{implied_vol, ImpliedVolConfig};

/// Net position in one asset, owned by exactly one portfolio state.
///
/// The sign of `amount` always matches the direction of the unmatched part
/// of the opening trade; the portfolio removes the position the moment the
/// amount reaches zero. Mark fields (`day`..`rho`) reflect the most recent
/// [`TradePosition::mark`].
#[derive(Debug, Clone)]
pub struct TradePosition {
    /// Originating trade.
    pub trade: Arc<Trade>,
    /// Signed open quantity still unmatched.
    pub amount: f64,
    /// Day of the last mark.
    pub day: Day,
    /// Rate of the last mark.
    pub rate: f64,
    /// Price of the last mark.
    pub price: f64,
    /// Unrealized profit against the opening price.
    pub profit: f64,
    /// Implied volatility recovered at the last mark; NaN when the position
    /// is not an option or could not be inverted yet.
    pub implied_vol: f64,
    /// Amount-scaled delta.
    pub delta: f64,
    /// Amount-scaled gamma.
    pub gamma: f64,
    /// Amount-scaled theta.
    pub theta: f64,
    /// Amount-scaled vega.
    pub vega: f64,
    /// Amount-scaled rho.
    pub rho: f64,
}

impl TradePosition {
    /// Opens a position for the unmatched remainder of `trade` and marks it
    /// at the trade's own terms.
    pub fn open(
        trade: Arc<Trade>,
        amount: f64,
        models: &ModelTable,
        underlying_price: Option<f64>,
    ) -> Self {
        let mut position = Self {
            trade,
            amount,
            day: f64::NAN,
            rate: f64::NAN,
            price: f64::NAN,
            profit: 0.0,
            implied_vol: f64::NAN,
            delta: 0.0,
            gamma: 0.0,
            theta: 0.0,
            vega: 0.0,
            rho: 0.0,
        };
        let (day, rate, price) = (
            position.trade.day,
            position.trade.rate,
            position.trade.price,
        );
        position.mark(models, day, rate, price, underlying_price);
        position
    }

    /// Re-marks the position at an observed price.
    ///
    /// General and futures positions carry `delta = amount`. Option
    /// positions recover implied volatility from the mark price through the
    /// model selected for their underlying type and scale the resulting
    /// Greeks by the open amount; without an underlying price or a model
    /// mapping the Greeks stay zero and the implied vol NaN.
    pub fn mark(
        &mut self,
        models: &ModelTable,
        day: Day,
        rate: f64,
        price: f64,
        underlying_price: Option<f64>,
    ) {
        self.day = day;
        self.rate = rate;
        self.price = price;
        self.profit = self.amount * (price - self.trade.price);
        self.implied_vol = f64::NAN;
        self.delta = 0.0;
        self.gamma = 0.0;
        self.theta = 0.0;
        self.vega = 0.0;
        self.rho = 0.0;

        match &self.trade.asset.kind {
            AssetKind::General | AssetKind::Future { .. } => {
                self.delta = self.amount;
            }
            AssetKind::Option {
                mature,
                underlying,
                exercise,
                direction,
            } => {
                let Some(uprice) = underlying_price else {
                    return;
                };
                let Some(model) = models.for_underlying(&underlying.kind) else {
                    return;
                };
                let t = years_to_maturity(day, *mature);
                let iv = implied_vol(
                    model,
                    price,
                    uprice,
                    *exercise,
                    rate,
                    t,
                    *direction,
                    &ImpliedVolConfig::default(),
                );
                self.implied_vol = iv;
                let g = greeks::greeks(model, uprice, *exercise, rate, iv, t, *direction)
                    .scaled(self.amount);
                self.delta = g.delta;
                self.gamma = g.gamma;
                self.theta = g.theta;
                self.vega = g.vega;
                self.rho = g.rho;
            }
            AssetKind::Bond | AssetKind::Currency => {}
        }
    }
}
