//! Black-76 model for options on a futures underlying.

use crate::math::normal_cdf;
use crate::pricing::{OptionDirection, PricingModel};

/// Futures-underlying pricing convention: the futures level carries no
/// drift, so the whole payoff is discounted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Black76Model;

impl PricingModel for Black76Model {
    /// `d1 = (ln(s/k) + σ²·t/2) / (σ√t)`, `d2 = d1 − σ√t`,
    /// `price = d·e^(−rt)·(s·N(d·d1) − k·N(d·d2))` with `d = ±1`.
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
        let d1 = ((s / k).ln() + 0.5 * sigma * sigma * t) / vt;
        let d2 = d1 - vt;
        d * (-r * t).exp() * (s * normal_cdf(d * d1) - k * normal_cdf(d * d2))
    }
}
