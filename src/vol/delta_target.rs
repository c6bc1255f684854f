//! Delta-targeted underlying-price solver.
//!
//! Given a package of `nc` calls and `np` puts struck at the same level,
//! finds the underlying price at which the package's net delta reaches a
//! target. Used to answer "where does this book go delta-neutral" style
//! questions from position data.

use crate::core::time::{years_to_maturity, Day};
use crate::pricing::greeks::delta;
use crate::pricing::{OptionDirection, PricingModel};
use crate::vol::implied::MIN_PRICE_TICK;

/// Solver tolerance.
#[derive(Debug, Clone, Copy)]
pub struct DeltaTargetConfig {
    /// Price-bracket tolerance; the result is rounded to this tick.
    pub min_price_tick: f64,
}

impl Default for DeltaTargetConfig {
    fn default() -> Self {
        Self {
            min_price_tick: MIN_PRICE_TICK,
        }
    }
}

/// Finds the underlying price at which
/// `nc·delta(call, σc) + np·delta(put, σp)` meets `target`.
///
/// A call's delta lies in `(0, 1)` and a put's in `(−1, 0)`, so the package
/// delta is confined to the open interval `(−np, nc)`; a target outside it
/// has no solution and yields NaN, as does a non-positive leg volatility.
/// Bisection runs over `[0, 2k]` until the bracket is narrower than
/// `min_price_tick`, and the result is rounded to the nearest tick.
#[allow(clippy::too_many_arguments)]
pub fn price_for_delta<M: PricingModel + ?Sized>(
    model: &M,
    target: f64,
    k: f64,
    r: f64,
    sigma_call: f64,
    sigma_put: f64,
    t: f64,
    nc: f64,
    np: f64,
    config: &DeltaTargetConfig,
) -> f64 {
    if target <= -np || target >= nc || sigma_call <= 0.0 || sigma_put <= 0.0 {
        return f64::NAN;
    }
    let tick = config.min_price_tick;

    let mut f = k;
    let mut minf = 0.0;
    let mut maxf = k * 2.0;
    while maxf - minf > tick {
        let current = nc * delta(model, f, k, r, sigma_call, t, OptionDirection::Call)
            + np * delta(model, f, k, r, sigma_put, t, OptionDirection::Put);
        if current - target > 0.0 {
            maxf = f;
        } else {
            minf = f;
        }
        f = (maxf + minf) * 0.5;
    }
    (f / tick).round() * tick
}

/// [`price_for_delta`] with the maturity expressed as a `(day, mature)` pair.
#[allow(clippy::too_many_arguments)]
pub fn price_for_delta_on<M: PricingModel + ?Sized>(
    model: &M,
    target: f64,
    k: f64,
    r: f64,
    sigma_call: f64,
    sigma_put: f64,
    day: Day,
    mature: Day,
    nc: f64,
    np: f64,
    config: &DeltaTargetConfig,
) -> f64 {
    price_for_delta(
        model,
        target,
        k,
        r,
        sigma_call,
        sigma_put,
        years_to_maturity(day, mature),
        nc,
        np,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::greeks;
    use crate::pricing::BlackScholesModel;
    use approx::assert_abs_diff_eq;

    #[test]
    fn solved_price_reproduces_the_target_delta() {
        let cfg = DeltaTargetConfig::default();
        let (k, r, t) = (100.0, 0.02, 0.5);
        let (sc, sp) = (0.2, 0.25);
        let (nc, np) = (2.0, 3.0);
        let target = 0.5;

        let f = price_for_delta(&BlackScholesModel, target, k, r, sc, sp, t, nc, np, &cfg);
        assert!(f.is_finite());

        let net = nc * greeks::delta(&BlackScholesModel, f, k, r, sc, t, OptionDirection::Call)
            + np * greeks::delta(&BlackScholesModel, f, k, r, sp, t, OptionDirection::Put);
        assert_abs_diff_eq!(net, target, epsilon = 1e-2);
    }

    #[test]
    fn result_lands_on_the_tick_grid() {
        let cfg = DeltaTargetConfig {
            min_price_tick: 0.01,
        };
        let f = price_for_delta(
            &BlackScholesModel,
            0.2,
            50.0,
            0.02,
            0.3,
            0.3,
            1.0,
            1.0,
            1.0,
            &cfg,
        );
        assert_abs_diff_eq!(f, (f / 0.01).round() * 0.01, epsilon = 1e-12);
    }

    #[test]
    fn unreachable_targets_are_nan() {
        let cfg = DeltaTargetConfig::default();
        // Two calls and one put can only reach (-1, 2).
        assert!(price_for_delta(
            &BlackScholesModel,
            2.0,
            100.0,
            0.02,
            0.2,
            0.2,
            0.5,
            2.0,
            1.0,
            &cfg
        )
        .is_nan());
        assert!(price_for_delta(
            &BlackScholesModel,
            -1.0,
            100.0,
            0.02,
            0.2,
            0.2,
            0.5,
            2.0,
            1.0,
            &cfg
        )
        .is_nan());
        // Dead volatility on either leg.
        assert!(price_for_delta(
            &BlackScholesModel,
            0.1,
            100.0,
            0.02,
            0.0,
            0.2,
            0.5,
            1.0,
            1.0,
            &cfg
        )
        .is_nan());
    }
}
