//! Reference values and solver round trips for the pricing core.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ferrobook::pricing::{greeks, Black76Model, BlackScholesModel, OptionDirection, PricingModel};
use ferrobook::vol::{implied_vol, price_for_delta, DeltaTargetConfig, ImpliedVolConfig};

#[test]
fn black_scholes_reference_point() {
    // s=100, k=100, r=0.02, sigma=0.2, t=0.5.
    let call = BlackScholesModel.price(100.0, 100.0, 0.02, 0.2, 0.5, OptionDirection::Call);
    assert_abs_diff_eq!(call, 6.12, epsilon = 1e-2);

    let delta = greeks::delta(
        &BlackScholesModel,
        100.0,
        100.0,
        0.02,
        0.2,
        0.5,
        OptionDirection::Call,
    );
    assert_abs_diff_eq!(delta, 0.556, epsilon = 1e-2);
}

#[test]
fn finite_difference_delta_tracks_the_closed_form() {
    // N(d1) for the standard Hull point s=k=100, r=0.05, sigma=0.2, t=1.
    let delta = greeks::delta(
        &BlackScholesModel,
        100.0,
        100.0,
        0.05,
        0.2,
        1.0,
        OptionDirection::Call,
    );
    assert_abs_diff_eq!(delta, 0.6368, epsilon = 1e-3);
}

#[test]
fn nan_propagates_through_every_entry_point() {
    let cfg = ImpliedVolConfig::default();
    for direction in [OptionDirection::Call, OptionDirection::Put] {
        assert!(BlackScholesModel
            .price(-1.0, 100.0, 0.02, 0.2, 0.5, direction)
            .is_nan());
        assert!(Black76Model
            .price(100.0, 100.0, 0.02, -0.2, 0.5, direction)
            .is_nan());
        assert!(
            greeks::delta(&Black76Model, 0.0, 100.0, 0.02, 0.2, 0.5, direction).is_nan()
        );
        assert!(
            greeks::vega(&BlackScholesModel, 100.0, 100.0, 0.02, 0.0, 0.5, direction).is_nan()
        );
        assert!(implied_vol(
            &BlackScholesModel,
            -2.0,
            100.0,
            100.0,
            0.02,
            0.5,
            direction,
            &cfg
        )
        .is_nan());
    }
}

#[test]
fn implied_vol_round_trip_both_models() {
    let cfg = ImpliedVolConfig::default();
    for sigma in [0.12, 0.25, 0.6] {
        let p = BlackScholesModel.price(100.0, 110.0, 0.03, sigma, 0.5, OptionDirection::Call);
        let iv = implied_vol(
            &BlackScholesModel,
            p,
            100.0,
            110.0,
            0.03,
            0.5,
            OptionDirection::Call,
            &cfg,
        );
        let reproduced = BlackScholesModel.price(100.0, 110.0, 0.03, iv, 0.5, OptionDirection::Call);
        // Convergence is defined on the repriced premium.
        assert_abs_diff_eq!(reproduced, p, epsilon = cfg.min_price_tick);
    }

    let p = Black76Model.price(560.0, 560.0, 0.02, 0.3, 1.0, OptionDirection::Put);
    let iv = implied_vol(
        &Black76Model,
        p,
        560.0,
        560.0,
        0.02,
        1.0,
        OptionDirection::Put,
        &cfg,
    );
    assert_relative_eq!(iv, 0.3, epsilon = 1e-3);
}

#[test]
fn premium_below_intrinsic_is_rejected_in_band() {
    let cfg = ImpliedVolConfig::default();
    // Deep ITM call: intrinsic 50, quoted at 10.
    assert!(implied_vol(
        &BlackScholesModel,
        10.0,
        150.0,
        100.0,
        0.02,
        0.5,
        OptionDirection::Call,
        &cfg
    )
    .is_nan());
}

#[test]
fn delta_target_reproduces_the_target() {
    let cfg = DeltaTargetConfig::default();
    let (k, r, t) = (560.0, 0.02, 0.5);
    let (nc, np) = (3.0, 2.0);
    let target = -0.8;

    let f = price_for_delta(&Black76Model, target, k, r, 0.2, 0.22, t, nc, np, &cfg);
    assert!(f.is_finite());

    let net = nc * greeks::delta(&Black76Model, f, k, r, 0.2, t, OptionDirection::Call)
        + np * greeks::delta(&Black76Model, f, k, r, 0.22, t, OptionDirection::Put);
    assert_abs_diff_eq!(net, target, epsilon = 1e-2);
}

#[test]
fn delta_target_domain_guard() {
    let cfg = DeltaTargetConfig::default();
    // Achievable interval for 1 call and 2 puts is (-2, 1).
    for target in [1.0, -2.0, 5.0] {
        assert!(price_for_delta(
            &BlackScholesModel,
            target,
            100.0,
            0.02,
            0.2,
            0.2,
            0.5,
            1.0,
            2.0,
            &cfg
        )
        .is_nan());
    }
}
