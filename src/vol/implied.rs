//! Implied-volatility inversion for any [`PricingModel`].

use crate::core::time::{years_to_maturity, Day};
use crate::pricing::{OptionDirection, PricingModel};

/// Bracket-width floor below which bisection stops.
const EPSILON: f64 = 1e-9;

/// Default price tolerance.
pub const MIN_PRICE_TICK: f64 = 1e-4;

/// Default volatility ceiling for the bracket search.
pub const MAX_IMPL_VOL: f64 = 100.0;

/// Solver tolerances.
#[derive(Debug, Clone, Copy)]
pub struct ImpliedVolConfig {
    /// Absolute premium tolerance at which the search converges.
    pub min_price_tick: f64,
    /// Ceiling of the exponential bracket search.
    pub max_impl_vol: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            min_price_tick: MIN_PRICE_TICK,
            max_impl_vol: MAX_IMPL_VOL,
        }
    }
}

/// Recovers the volatility that reproduces an observed premium.
///
/// Parameters:
/// - `p`: observed option premium.
/// - `s`, `k`, `r`, `t`, `direction`: pricing state as in
///   [`PricingModel::price`].
///
/// Returns NaN when `p <= 0`, `s <= 0`, or the premium is below intrinsic
/// value `(s − k)·d`. The search brackets from vol 1.0 by doubling until
/// the priced value exceeds `p`, then bisects until the repriced premium is
/// within `min_price_tick` of `p` or the bracket is narrower than 1e-9.
/// When no bracket exists below `max_impl_vol`, that ceiling is returned.
///
/// # Examples
/// ```
/// use ferrobook::pricing::{BlackScholesModel, OptionDirection, PricingModel};
/// use ferrobook::vol::{implied_vol, ImpliedVolConfig};
///
/// let sigma = 0.25;
/// let p = BlackScholesModel.price(100.0, 105.0, 0.02, sigma, 1.0, OptionDirection::Call);
/// let iv = implied_vol(
///     &BlackScholesModel,
///     p,
///     100.0,
///     105.0,
///     0.02,
///     1.0,
///     OptionDirection::Call,
///     &ImpliedVolConfig::default(),
/// );
/// assert!((iv - sigma).abs() < 1e-2);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn implied_vol<M: PricingModel + ?Sized>(
    model: &M,
    p: f64,
    s: f64,
    k: f64,
    r: f64,
    t: f64,
    direction: OptionDirection,
    config: &ImpliedVolConfig,
) -> f64 {
    if p <= 0.0 || s <= 0.0 || p < (s - k) * direction.sign() {
        return f64::NAN;
    }

    let mut miniv = 0.0;
    let mut maxiv = 1.0;
    while maxiv < config.max_impl_vol {
        let dp = model.price(s, k, r, maxiv, t, direction) - p;
        if dp.abs() < config.min_price_tick {
            return maxiv;
        }
        if dp > 0.0 {
            break;
        }
        miniv = maxiv;
        maxiv *= 2.0;
    }

    if maxiv >= config.max_impl_vol {
        return config.max_impl_vol;
    }

    while maxiv - miniv > EPSILON {
        let iv = (maxiv + miniv) * 0.5;
        let dp = model.price(s, k, r, iv, t, direction) - p;
        if dp.abs() < config.min_price_tick {
            return iv;
        }
        if dp > 0.0 {
            maxiv = iv;
        } else {
            miniv = iv;
        }
    }
    maxiv
}

/// [`implied_vol`] with the maturity expressed as a `(day, mature)` pair.
#[allow(clippy::too_many_arguments)]
pub fn implied_vol_on<M: PricingModel + ?Sized>(
    model: &M,
    p: f64,
    s: f64,
    k: f64,
    r: f64,
    day: Day,
    mature: Day,
    direction: OptionDirection,
    config: &ImpliedVolConfig,
) -> f64 {
    implied_vol(
        model,
        p,
        s,
        k,
        r,
        years_to_maturity(day, mature),
        direction,
        config,
    )
}
