//! Inversion routines built on the pricing contract.
//!
//! [`implied`] recovers the volatility reproducing an observed premium;
//! [`delta_target`] recovers the underlying price at which a call/put
//! package reaches a target net delta. Both are bounded bracket-and-bisect
//! searches, and both signal unreachable inputs in-band as NaN.

pub mod delta_target;
pub mod implied;

pub use delta_target::{price_for_delta, price_for_delta_on, DeltaTargetConfig};
pub use implied::{implied_vol, implied_vol_on, ImpliedVolConfig};
