use serde::{Deserialize, Serialize};

/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionDirection {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionDirection {
    /// Returns +1.0 for calls and -1.0 for puts.
    pub fn sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }

    /// Reads the ±1 wire encoding back into a direction.
    pub fn from_sign(sign: f64) -> Option<Self> {
        if sign > 0.0 {
            Some(Self::Call)
        } else if sign < 0.0 {
            Some(Self::Put)
        } else {
            None
        }
    }
}

/// Bumped finite-difference sensitivities of one option price.
///
/// Values carry the fixed-step scaling of the Greek engine
/// (see [`crate::pricing::greeks`]): the ±0.005 spot bump, the ∓0.005-day
/// time bump, the ±0.00005 vol bump, and the ±0.0000005 rate bump, each
/// differenced and multiplied by 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Greeks {
    /// First derivative to the underlying price.
    pub delta: f64,
    /// Second derivative to the underlying price.
    pub gamma: f64,
    /// First derivative to time.
    pub theta: f64,
    /// First derivative to volatility.
    pub vega: f64,
    /// First derivative to rate.
    pub rho: f64,
}

impl Greeks {
    /// Greeks of a position holding `amount` contracts of the same option.
    pub fn scaled(&self, amount: f64) -> Self {
        Self {
            delta: self.delta * amount,
            gamma: self.gamma * amount,
            theta: self.theta * amount,
            vega: self.vega * amount,
            rho: self.rho * amount,
        }
    }
}
