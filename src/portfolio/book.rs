//! FIFO trade matching, cash accounting, and the two-phase portfolio mark.

use std::sync::Arc;

use crate::assets::AssetKind;
use crate::core::error::BookError;
use crate::margin::margin_option;
use crate::market::MarketSnapshot;
use crate::portfolio::position::TradePosition;
use crate::portfolio::trade::Trade;
use crate::pricing::{Black76Model, BlackScholesModel, PricingModel};

/// Pricing-model selection by underlying asset type, injected into every
/// portfolio at construction.
#[derive(Debug, Clone)]
pub struct ModelTable {
    spot: Arc<dyn PricingModel>,
    futures: Arc<dyn PricingModel>,
}

impl ModelTable {
    /// Wires explicit model instances.
    pub fn new(spot: Arc<dyn PricingModel>, futures: Arc<dyn PricingModel>) -> Self {
        Self { spot, futures }
    }

    /// Model for an option whose underlying has the given kind; options on
    /// bonds or currencies have no mapping.
    pub fn for_underlying(&self, kind: &AssetKind) -> Option<&dyn PricingModel> {
        match kind {
            AssetKind::General => Some(self.spot.as_ref()),
            AssetKind::Future { .. } => Some(self.futures.as_ref()),
            AssetKind::Option { .. } | AssetKind::Bond | AssetKind::Currency => None,
        }
    }
}

impl Default for ModelTable {
    /// Spot underlyings price through Black-Scholes, futures underlyings
    /// through Black-76.
    fn default() -> Self {
        Self::new(Arc::new(BlackScholesModel), Arc::new(Black76Model))
    }
}

/// Aggregate book state tied to one market snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioSnapshot {
    /// Id of the market snapshot this aggregate was marked against.
    pub snapshot_id: u64,
    /// Total unrealized profit.
    pub profit: f64,
    /// Total margin requirement.
    pub margin: f64,
    /// Net amount-scaled delta.
    pub delta: f64,
    /// Net amount-scaled gamma.
    pub gamma: f64,
    /// Net amount-scaled theta.
    pub theta: f64,
    /// Net amount-scaled vega.
    pub vega: f64,
    /// Net amount-scaled rho.
    pub rho: f64,
}

/// One state of a trading book.
///
/// Positions are kept oldest-open first; `cost` accumulates fees and
/// `income` realized cash flow. States are built copy-on-write: applying a
/// trade derives a successor and never mutates the current state.
#[derive(Debug, Clone)]
pub struct TradePortfolio {
    /// Open positions, oldest first.
    pub positions: Vec<TradePosition>,
    /// Marks recorded against this state, in application order.
    pub snapshots: Vec<PortfolioSnapshot>,
    /// Accumulated fees.
    pub cost: f64,
    /// Accumulated realized cash flow.
    pub income: f64,
    models: Arc<ModelTable>,
}

impl TradePortfolio {
    /// An empty book using the injected model table.
    pub fn new(models: Arc<ModelTable>) -> Self {
        Self {
            positions: Vec::new(),
            snapshots: Vec::new(),
            cost: 0.0,
            income: 0.0,
            models,
        }
    }

    /// Reassembles a stored state; entry point for the serialization
    /// boundary, which restores mark state without replaying trades.
    pub fn restore(
        positions: Vec<TradePosition>,
        snapshots: Vec<PortfolioSnapshot>,
        cost: f64,
        income: f64,
        models: Arc<ModelTable>,
    ) -> Self {
        Self {
            positions,
            snapshots,
            cost,
            income,
            models,
        }
    }

    /// Derives the successor state with `trade` applied.
    ///
    /// Fees always accrue to `cost`. A non-marginal trade cash-settles at
    /// execution (`income -= amount·price`); a marginal one realizes
    /// variation P&L as positions close. Matching walks open positions
    /// oldest first, closing against opposite-signed positions on the same
    /// asset until the trade amount is consumed; any residual opens a new
    /// position marked immediately at the trade's own terms
    /// (`underlying_price` feeds the option mark when known).
    ///
    /// The successor starts with an empty snapshot history: portfolio
    /// snapshots describe one exact position set.
    pub fn apply_trade(&self, trade: &Arc<Trade>, underlying_price: Option<f64>) -> Self {
        let mut next = Self {
            positions: self.positions.clone(),
            snapshots: Vec::new(),
            cost: self.cost + trade.fee,
            income: self.income,
            models: Arc::clone(&self.models),
        };
        if !trade.marginal {
            next.income -= trade.amount * trade.price;
        }

        let mut remaining = trade.amount;
        let mut realized = 0.0;
        next.positions.retain_mut(|position| {
            let opposite = remaining > 0.0 && position.amount < 0.0
                || remaining < 0.0 && position.amount > 0.0;
            if position.trade.asset.name != trade.asset.name || !opposite {
                return true;
            }
            let matched = remaining.abs().min(position.amount.abs());
            let direction = if position.amount > 0.0 { 1.0 } else { -1.0 };
            if trade.marginal {
                realized += direction * matched * (trade.price - position.trade.price);
            }
            if remaining.abs() >= position.amount.abs() {
                // Full close: the remainder shrinks by the closed amount
                // and the position is removed.
                remaining += position.amount;
                position.amount = 0.0;
                false
            } else {
                position.amount += remaining;
                remaining = 0.0;
                true
            }
        });
        next.income += realized;

        if remaining != 0.0 {
            let opened =
                TradePosition::open(Arc::clone(trade), remaining, &next.models, underlying_price);
            next.positions.push(opened);
        }
        next
    }

    /// Marks every open position against `snapshot` and appends the
    /// aggregate to this state's snapshot history.
    ///
    /// All-or-nothing: a missing asset price, underlying price, or margin
    /// rate aborts with an error naming the asset and leaves both
    /// `positions` and `snapshots` untouched. Phase 1 recomputes profit
    /// and Greeks (options invert implied vol from their mark price
    /// through the model selected by underlying type); phase 2 charges
    /// margin for marginal positions — short options through the
    /// single-leg formula at the underlying's margin rate, everything else
    /// at `|amount|·price·rate` under its own name.
    pub fn snapshot(&mut self, snapshot: &MarketSnapshot) -> Result<(), BookError> {
        // Phase 1 runs on a scratch copy so a failure commits nothing.
        let mut marked = self.positions.clone();
        let mut profit = 0.0;
        let mut delta = 0.0;
        let mut gamma = 0.0;
        let mut theta = 0.0;
        let mut vega = 0.0;
        let mut rho = 0.0;
        for position in &mut marked {
            let asset = &position.trade.asset;
            let price = snapshot
                .price_of(&asset.name)
                .ok_or_else(|| BookError::MissingPrice {
                    asset: asset.name.clone(),
                })?;
            let underlying_price = match &asset.kind {
                AssetKind::Option { underlying, .. } => Some(
                    snapshot
                        .price_of(&underlying.name)
                        .ok_or_else(|| BookError::MissingPrice {
                            asset: underlying.name.clone(),
                        })?,
                ),
                _ => None,
            };
            position.mark(&self.models, snapshot.day, snapshot.rate, price, underlying_price);
            profit += position.profit;
            delta += position.delta;
            gamma += position.gamma;
            theta += position.theta;
            vega += position.vega;
            rho += position.rho;
        }

        let mut margin = 0.0;
        for position in &marked {
            if !position.trade.marginal {
                continue;
            }
            let asset = &position.trade.asset;
            match &asset.kind {
                AssetKind::Option {
                    underlying,
                    exercise,
                    direction,
                    ..
                } if position.amount < 0.0 => {
                    // Underlying price resolved in phase 1.
                    let underlying_price = snapshot.price_of(&underlying.name).ok_or_else(|| {
                        BookError::MissingPrice {
                            asset: underlying.name.clone(),
                        }
                    })?;
                    let rate = snapshot.margin_of(&underlying.name).ok_or_else(|| {
                        BookError::MissingMarginRate {
                            asset: underlying.name.clone(),
                        }
                    })?;
                    margin += position.amount.abs()
                        * margin_option(position.price, underlying_price, *exercise, rate, *direction);
                }
                _ => {
                    let rate = snapshot.margin_of(&asset.name).ok_or_else(|| {
                        BookError::MissingMarginRate {
                            asset: asset.name.clone(),
                        }
                    })?;
                    margin += position.amount.abs() * position.price * rate;
                }
            }
        }

        self.positions = marked;
        self.snapshots.push(PortfolioSnapshot {
            snapshot_id: snapshot.id,
            profit,
            margin,
            delta,
            gamma,
            theta,
            vega,
            rho,
        });
        Ok(())
    }
}
