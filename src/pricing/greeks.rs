//! Central finite-difference Greeks over any [`PricingModel`].
//!
//! The step sizes and the ×100 scaling are contractual: every consumer of
//! these sensitivities (position marks, the delta-target solver, margin
//! checks downstream) assumes exactly these bumped units. Each routine
//! carries the same NaN domain guard as the pricing contract itself.

use crate::core::time::{years_to_maturity, Day, DAYS_PER_YEAR};
use crate::core::types::Greeks;
use crate::pricing::{OptionDirection, PricingModel};

/// Absolute underlying-price bump for delta and gamma.
const SPOT_BUMP: f64 = 0.005;
/// Volatility bump for vega.
const VOL_BUMP: f64 = 0.00005;
/// Rate bump for rho.
const RATE_BUMP: f64 = 0.000_000_5;
/// Central-difference scaling shared by all five Greeks.
const SCALE: f64 = 100.0;

/// Sensitivity to the underlying price.
///
/// `(P(s + 0.005) − P(s − 0.005)) × 100`; with the 0.01-wide bump this is
/// the per-unit delta. NaN when `s <= 0` or `sigma <= 0`.
pub fn delta<M: PricingModel + ?Sized>(
    model: &M,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    direction: OptionDirection,
) -> f64 {
    if s <= 0.0 || sigma <= 0.0 {
        return f64::NAN;
    }
    (model.price(s + SPOT_BUMP, k, r, sigma, t, direction)
        - model.price(s - SPOT_BUMP, k, r, sigma, t, direction))
        * SCALE
}

/// Sensitivity of delta to the underlying price, differenced with the same
/// ±0.005 bump.
pub fn gamma<M: PricingModel + ?Sized>(
    model: &M,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    direction: OptionDirection,
) -> f64 {
    if s <= 0.0 || sigma <= 0.0 {
        return f64::NAN;
    }
    (delta(model, s + SPOT_BUMP, k, r, sigma, t, direction)
        - delta(model, s - SPOT_BUMP, k, r, sigma, t, direction))
        * SCALE
}

/// Cost of time decay over a 0.005-day step.
///
/// The maturity is bumped by ∓0.005/365 years so the sign convention
/// yields the decay cost of passing time.
pub fn theta<M: PricingModel + ?Sized>(
    model: &M,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    direction: OptionDirection,
) -> f64 {
    if s <= 0.0 || sigma <= 0.0 {
        return f64::NAN;
    }
    let dt = -0.005 / DAYS_PER_YEAR;
    (model.price(s, k, r, sigma, t + dt, direction)
        - model.price(s, k, r, sigma, t - dt, direction))
        * SCALE
}

/// Sensitivity to volatility over a ±0.00005 bump; the scaling yields vega
/// per percentage point of vol.
pub fn vega<M: PricingModel + ?Sized>(
    model: &M,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    direction: OptionDirection,
) -> f64 {
    if s <= 0.0 || sigma <= 0.0 {
        return f64::NAN;
    }
    (model.price(s, k, r, sigma + VOL_BUMP, t, direction)
        - model.price(s, k, r, sigma - VOL_BUMP, t, direction))
        * SCALE
}

/// Sensitivity to the rate over a ±0.0000005 bump; the scaling yields rho
/// per basis point.
pub fn rho<M: PricingModel + ?Sized>(
    model: &M,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    direction: OptionDirection,
) -> f64 {
    if s <= 0.0 || sigma <= 0.0 {
        return f64::NAN;
    }
    (model.price(s, k, r + RATE_BUMP, sigma, t, direction)
        - model.price(s, k, r - RATE_BUMP, sigma, t, direction))
        * SCALE
}

/// All five sensitivities of one option at the same point.
pub fn greeks<M: PricingModel + ?Sized>(
    model: &M,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    direction: OptionDirection,
) -> Greeks {
    Greeks {
        delta: delta(model, s, k, r, sigma, t, direction),
        gamma: gamma(model, s, k, r, sigma, t, direction),
        theta: theta(model, s, k, r, sigma, t, direction),
        vega: vega(model, s, k, r, sigma, t, direction),
        rho: rho(model, s, k, r, sigma, t, direction),
    }
}

/// [`greeks`] with the maturity expressed as a `(day, mature)` pair.
pub fn greeks_on<M: PricingModel + ?Sized>(
    model: &M,
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    day: Day,
    mature: Day,
    direction: OptionDirection,
) -> Greeks {
    greeks(model, s, k, r, sigma, years_to_maturity(day, mature), direction)
}
