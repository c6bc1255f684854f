//! Exchange margin formulas for short option positions.
//!
//! Pure arithmetic; every input is a per-unit price or rate and every
//! output is the per-unit margin charge. The portfolio engine consumes
//! [`margin_option`] directly; the strategy-level formulas are provided
//! for callers building covered/straddle/spread margin on top of position
//! data.

use crate::core::types::OptionDirection;

/// Single short leg.
///
/// Settlement premium plus the larger of the underlying futures margin
/// less half the out-of-the-money amount, and half the futures margin:
/// `p + max(f·r − max(d·(k − f), 0)/2, f·r/2)`.
///
/// - `p`: option settlement price.
/// - `f`: underlying price.
/// - `k`: exercise price.
/// - `r`: margin rate of the underlying contract.
/// - `direction`: side of the short option.
pub fn margin_option(p: f64, f: f64, k: f64, r: f64, direction: OptionDirection) -> f64 {
    let mf = f * r;
    p + (mf - (direction.sign() * (k - f)).max(0.0) * 0.5).max(mf * 0.5)
}

/// Short option covered by an offsetting futures position:
/// futures margin plus the settlement premium.
pub fn margin_covered(p: f64, f: f64, r: f64) -> f64 {
    p + f * r
}

/// Short straddle (same strike) or strangle (put strike below call strike):
/// both leg margins when struck as a strangle, otherwise the larger leg
/// margin plus the other leg's premium.
pub fn margin_strangle(pc: f64, pp: f64, f: f64, kc: f64, kp: f64, r: f64) -> f64 {
    let mc = margin_option(pc, f, kc, r, OptionDirection::Call);
    let mp = margin_option(pp, f, kp, r, OptionDirection::Put);
    if kc < kp {
        mc + mp
    } else if mc < mp {
        mp + pc
    } else {
        mc + pp
    }
}

/// Vertical spread: long leg at `kl`, short leg at `ks`, both `direction`.
/// A credit spread margins the lesser of the strike gap and the naked
/// short-leg margin; a debit spread needs none.
pub fn margin_spread(ps: f64, f: f64, kl: f64, ks: f64, r: f64, direction: OptionDirection) -> f64 {
    let spread = direction.sign() * (kl - ks);
    if spread <= 0.0 {
        0.0
    } else {
        spread.min(margin_option(ps, f, ks, r, direction))
    }
}
