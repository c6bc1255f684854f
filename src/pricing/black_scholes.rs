//! Black-Scholes-Merton model for options on a spot underlying.

use crate::math::normal_cdf;
use crate::pricing::{OptionDirection, PricingModel};

/// Spot-underlying pricing convention: the underlying leg grows at the
/// risk-free rate, so only the strike leg is discounted.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholesModel;

impl PricingModel for BlackScholesModel {
    /// `d1 = (ln(s/k) + (r + σ²/2)·t) / (σ√t)`, `d2 = d1 − σ√t`,
    /// `price = d·(s·N(d·d1) − k·e^(−rt)·N(d·d2))` with `d = ±1`.
    ///
    /// # Examples
    /// ```
    /// use ferrobook::pricing::{BlackScholesModel, OptionDirection, PricingModel};
    ///
    /// let call = BlackScholesModel.price(100.0, 100.0, 0.02, 0.2, 0.5, OptionDirection::Call);
    /// assert!((call - 6.12).abs() < 1e-2);
    /// ```
    fn price(
        &self,
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
        let d = direction.sign();
        let vt = sigma * t.sqrt();
        let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vt;
        let d2 = d1 - vt;
        d * (s * normal_cdf(d * d1) - k * (-r * t).exp() * normal_cdf(d * d2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn known_values() {
        let call = BlackScholesModel.price(100.0, 100.0, 0.05, 0.2, 1.0, OptionDirection::Call);
        assert_relative_eq!(call, 10.4506, epsilon = 2e-4);

        let put = BlackScholesModel.price(100.0, 100.0, 0.05, 0.2, 1.0, OptionDirection::Put);
        assert_relative_eq!(put, 5.5735, epsilon = 2e-4);
    }

    #[test]
    fn put_call_parity() {
        let s = 100.0;
        let k = 95.0;
        let r = 0.03;
        let sigma = 0.22;
        let t = 1.4;

        let c = BlackScholesModel.price(s, k, r, sigma, t, OptionDirection::Call);
        let p = BlackScholesModel.price(s, k, r, sigma, t, OptionDirection::Put);

        assert_relative_eq!(c - p, s - k * (-r * t).exp(), epsilon = 2e-6);
    }

    #[test]
    fn domain_guard_returns_nan() {
        assert!(BlackScholesModel
            .price(0.0, 100.0, 0.05, 0.2, 1.0, OptionDirection::Call)
            .is_nan());
        assert!(BlackScholesModel
            .price(100.0, 100.0, 0.05, -0.2, 1.0, OptionDirection::Put)
            .is_nan());
    }

    #[test]
    fn day_pair_matches_year_fraction() {
        let by_t = BlackScholesModel.price(100.0, 100.0, 0.02, 0.2, 0.5, OptionDirection::Call);
        let by_day =
            BlackScholesModel.price_on(100.0, 100.0, 0.02, 0.2, 0.0, 182.5, OptionDirection::Call);
        assert_relative_eq!(by_t, by_day, epsilon = 1e-12);
    }
}
