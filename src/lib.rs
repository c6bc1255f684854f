//! Ferrobook prices derivative instruments and tracks a trading book's
//! realized and unrealized risk over time.
//!
//! The crate has two tightly coupled halves:
//! - a pricing core: the [`pricing::PricingModel`] contract with
//!   spot-convention ([`pricing::BlackScholesModel`]) and futures-convention
//!   ([`pricing::Black76Model`]) implementations, finite-difference Greeks,
//!   an implied-volatility solver, and a delta-targeted price solver;
//! - a book engine: FIFO trade matching into positions
//!   ([`portfolio::TradePortfolio`]), mark-to-market against
//!   [`market::MarketSnapshot`] tables, and an append-only history of
//!   portfolio states ([`portfolio::TradeTransaction`]).
//!
//! Numeric domain violations (non-positive spot/vol, premiums below
//! intrinsic, unreachable delta targets) come back as NaN; structural
//! failures (unknown names/ids, missing snapshot prices, bad history
//! indices) come back as [`core::BookError`].
//!
//! # Quick Start
//! Price a call and read its delta:
//! ```rust
//! use ferrobook::pricing::{greeks, BlackScholesModel, OptionDirection, PricingModel};
//!
//! let px = BlackScholesModel.price(100.0, 100.0, 0.02, 0.2, 0.5, OptionDirection::Call);
//! assert!((px - 6.12).abs() < 1e-2);
//!
//! let delta = greeks::delta(&BlackScholesModel, 100.0, 100.0, 0.02, 0.2, 0.5, OptionDirection::Call);
//! assert!((delta - 0.556).abs() < 1e-2);
//! ```
//!
//! Recover an implied volatility:
//! ```rust
//! use ferrobook::pricing::{BlackScholesModel, OptionDirection, PricingModel};
//! use ferrobook::vol::{implied_vol, ImpliedVolConfig};
//!
//! let premium = BlackScholesModel.price(100.0, 105.0, 0.02, 0.25, 1.0, OptionDirection::Call);
//! let iv = implied_vol(
//!     &BlackScholesModel,
//!     premium,
//!     100.0,
//!     105.0,
//!     0.02,
//!     1.0,
//!     OptionDirection::Call,
//!     &ImpliedVolConfig::default(),
//! );
//! assert!((iv - 0.25).abs() < 1e-2);
//! ```
//!
//! Book trades and watch FIFO matching settle the cash:
//! ```rust
//! use std::sync::Arc;
//!
//! use ferrobook::assets::{Asset, AssetRegistry};
//! use ferrobook::portfolio::{ModelTable, Trade, TradeTransaction};
//!
//! let mut registry = AssetRegistry::new();
//! let stock = registry.register(Asset::general("X"));
//!
//! let mut book = TradeTransaction::new(1, Arc::new(ModelTable::default()));
//! book.apply_trade(
//!     Trade::new(1, Arc::clone(&stock), false, 10.0, 0.0, 0.02, 100.0, 1.0),
//!     None,
//! )
//! .unwrap();
//! book.apply_trade(
//!     Trade::new(2, stock, false, -4.0, 1.0, 0.02, 110.0, 0.5),
//!     None,
//! )
//! .unwrap();
//!
//! let state = book.latest();
//! assert_eq!(state.positions[0].amount, 6.0);
//! assert_eq!(state.cost, 1.5);
//! assert_eq!(state.income, -1000.0 + 440.0);
//! ```

pub mod assets;
pub mod core;
pub mod margin;
pub mod market;
pub mod math;
pub mod portfolio;
pub mod pricing;
pub mod vol;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::assets::{Asset, AssetKind, AssetRegistry};
    pub use crate::core::{BookError, Day, Greeks, OptionDirection};
    pub use crate::market::MarketSnapshot;
    pub use crate::portfolio::{
        ModelTable, PortfolioSnapshot, Trade, TradePortfolio, TradePosition, TradeTransaction,
    };
    pub use crate::pricing::{Black76Model, BlackScholesModel, PricingModel};
    pub use crate::vol::{implied_vol, price_for_delta, DeltaTargetConfig, ImpliedVolConfig};
}
