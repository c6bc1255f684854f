//! Option pricing models and the finite-difference Greek engine.
//!
//! [`PricingModel`] is the single contract every numeric routine in this
//! crate is built on: the Greek engine, the implied-volatility solver, the
//! delta-target solver, and the portfolio mark all stay model-agnostic by
//! working through it. Two discounting conventions are provided:
//! [`BlackScholesModel`] for spot underlyings and [`Black76Model`] for
//! futures underlyings.

pub mod black76;
pub mod black_scholes;
pub mod greeks;

pub use black76::Black76Model;
pub use black_scholes::BlackScholesModel;

pub use crate::core::types::OptionDirection;
use crate::core::time::{years_to_maturity, Day};

/// Closed-form option pricing contract.
///
/// `price` is domain-guarded: implementations return NaN when the
/// underlying price or the volatility is non-positive, so callers can
/// branch on `is_nan()` instead of handling failures.
pub trait PricingModel: std::fmt::Debug + Send + Sync {
    /// Prices one option.
    ///
    /// Parameters:
    /// - `s`: underlying price (spot or futures level by convention).
    /// - `k`: exercise price.
    /// - `r`: continuously compounded annual rate.
    /// - `sigma`: annualized volatility.
    /// - `t`: time to maturity in years.
    /// - `direction`: call or put.
    fn price(&self, s: f64, k: f64, r: f64, sigma: f64, t: f64, direction: OptionDirection)
        -> f64;

    /// Prices with the maturity expressed as a `(day, mature)` pair on the
    /// fractional-day clock.
    fn price_on(
        &self,
        s: f64,
        k: f64,
        r: f64,
        sigma: f64,
        day: Day,
        mature: Day,
        direction: OptionDirection,
    ) -> f64 {
        self.price(s, k, r, sigma, years_to_maturity(day, mature), direction)
    }
}
