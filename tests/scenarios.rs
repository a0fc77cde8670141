//! Acceptance scenarios for the power engine.
//!
//! These tests pin the externally observable contract: the four reference
//! scenarios (a healthy design, a collapsed denominator df, a missing
//! eigenvalue, and a confidence-limit run), the sentinel/diagnostic rules
//! around them, and the behavior of the all-statistics entry point.

use glmpower::multirep::hlt_power;
use glmpower::{
    power_all, ClType, Design, Diagnostics, Eigenvalues, HltApprox, MethodSelector, MethodTag,
    PowerConfig, WarningCode,
};

fn scenario_design() -> Design {
    Design::new(2, 3, 4, 20).unwrap()
}

fn scenario_eigenvalues() -> Eigenvalues {
    Eigenvalues::from([0.5, 0.2])
}

fn mckeon_config() -> PowerConfig {
    PowerConfig::new().methods(MethodSelector {
        hlt: HltApprox::McKeon,
        ..MethodSelector::default()
    })
}

fn pillai_config() -> PowerConfig {
    PowerConfig::new().methods(MethodSelector {
        hlt: HltApprox::Pillai,
        ..MethodSelector::default()
    })
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn scenario_a_healthy_design() {
    let mut diag = Diagnostics::new();
    let interval = hlt_power(
        &scenario_design(),
        &scenario_eigenvalues(),
        &mckeon_config(),
        &mut diag,
    )
    .unwrap();

    let power = interval.power.expect("power should be computable");
    assert!(power > 0.0 && power < 1.0, "power was {}", power);
    assert!(interval.lower.is_none(), "no lower bound was requested");
    assert!(interval.upper.is_none(), "no upper bound was requested");
    assert!(diag.warnings().is_empty());
    assert!(diag.method_for(MethodTag::HotellingLawley).is_some());
}

#[test]
fn scenario_b_collapsed_denominator_df() {
    // N=7 under the one-moment method: df2 = 2*(7-4-3-1) + 2 = 0.
    let design = Design::new(2, 3, 4, 7).unwrap();
    let mut diag = Diagnostics::new();
    let interval = hlt_power(&design, &scenario_eigenvalues(), &pillai_config(), &mut diag).unwrap();

    assert!(interval.power.is_none());
    assert!(interval.lower.is_none() && interval.upper.is_none());
    assert_eq!(diag.warning_count(WarningCode::DegenerateDf), 1);
    assert!(
        diag.methods().is_empty(),
        "no distribution call should have happened"
    );
}

#[test]
fn scenario_c_missing_eigenvalue() {
    let eigs = Eigenvalues::from_slice(&[f64::NAN, 0.2]);
    let mut diag = Diagnostics::new();
    let interval = hlt_power(&scenario_design(), &eigs, &mckeon_config(), &mut diag).unwrap();

    assert!(interval.power.is_none());
    assert_eq!(diag.warning_count(WarningCode::DegenerateDf), 1);
    assert!(diag.methods().is_empty());
}

#[test]
fn scenario_d_confidence_limits() {
    let config = mckeon_config()
        .confidence(ClType::BetaKnown, 20, 4)
        .confidence_tails(0.025, 0.975)
        .confidence_tolerance(1e-6);
    let mut diag = Diagnostics::new();
    let interval = hlt_power(
        &scenario_design(),
        &scenario_eigenvalues(),
        &config,
        &mut diag,
    )
    .unwrap();

    let lower = interval.lower.expect("lower bound requested");
    let power = interval.power.expect("power computable");
    let upper = interval.upper.expect("upper bound requested");
    assert!(lower.is_finite() && power.is_finite() && upper.is_finite());
    assert!(lower <= power, "{} > {}", lower, power);
    assert!(power <= upper, "{} > {}", power, upper);

    // Each bound records its own numeric method, separate from the point
    // estimate's record.
    assert!(diag.method_for(MethodTag::HotellingLawley).is_some());
    assert!(diag.method_for(MethodTag::ConfidenceLower).is_some());
    assert!(diag.method_for(MethodTag::ConfidenceUpper).is_some());
}

// =============================================================================
// Sentinel and diagnostic rules
// =============================================================================

#[test]
fn confidence_skipped_when_power_missing() {
    // Scenario B's degenerate design plus a confidence request: code 15 for
    // the derivation, code 16 for the skipped solver, no bounds.
    let design = Design::new(2, 3, 4, 7).unwrap();
    let config = pillai_config().confidence(ClType::BetaKnown, 20, 4);
    let mut diag = Diagnostics::new();
    let interval = hlt_power(&design, &scenario_eigenvalues(), &config, &mut diag).unwrap();

    assert!(interval.power.is_none());
    assert!(interval.lower.is_none() && interval.upper.is_none());
    assert_eq!(diag.warning_count(WarningCode::DegenerateDf), 1);
    assert_eq!(diag.warning_count(WarningCode::PowerMissingForCl), 1);
}

#[test]
fn equal_tail_probabilities_give_equal_bounds() {
    let config = mckeon_config()
        .confidence(ClType::BetaKnown, 20, 4)
        .confidence_tails(0.5, 0.5)
        .confidence_tolerance(1e-8);
    let mut diag = Diagnostics::new();
    let interval = hlt_power(
        &scenario_design(),
        &scenario_eigenvalues(),
        &config,
        &mut diag,
    )
    .unwrap();

    let lower = interval.lower.unwrap();
    let upper = interval.upper.unwrap();
    assert!(
        (lower - upper).abs() < 1e-6,
        "degenerate interval should collapse: {} vs {}",
        lower,
        upper
    );
}

#[test]
fn estimated_effect_mode_produces_ordered_bounds() {
    let config = mckeon_config().confidence(ClType::BetaEstimated, 20, 4);
    let mut diag = Diagnostics::new();
    let interval = hlt_power(
        &scenario_design(),
        &scenario_eigenvalues(),
        &config,
        &mut diag,
    )
    .unwrap();

    let lower = interval.lower.unwrap();
    let power = interval.power.unwrap();
    let upper = interval.upper.unwrap();
    assert!(lower <= power && power <= upper, "{} {} {}", lower, power, upper);
}

#[test]
fn contract_violations_fail_loudly() {
    let mut diag = Diagnostics::new();

    // Bad alpha is an error, not a sentinel.
    let bad_alpha = PowerConfig::new().alpha(1.5);
    assert!(hlt_power(
        &scenario_design(),
        &scenario_eigenvalues(),
        &bad_alpha,
        &mut diag
    )
    .is_err());

    // Bad estimation design with confidence limits requested.
    let bad_est = PowerConfig::new().confidence(ClType::BetaKnown, 4, 4);
    assert!(hlt_power(
        &scenario_design(),
        &scenario_eigenvalues(),
        &bad_est,
        &mut diag
    )
    .is_err());

    // Nothing recorded on the error path.
    assert!(diag.is_empty());
}

// =============================================================================
// All-statistics entry point
// =============================================================================

#[test]
fn power_all_covers_three_statistics() {
    let mut diag = Diagnostics::new();
    let all = power_all(
        &scenario_design(),
        &scenario_eigenvalues(),
        &PowerConfig::new(),
        &mut diag,
    )
    .unwrap();

    for (name, interval) in [("hlt", all.hlt), ("pbt", all.pbt), ("wlk", all.wlk)] {
        let power = interval.power.unwrap_or_else(|| panic!("{} missing", name));
        assert!(power > 0.0 && power < 1.0, "{}: {}", name, power);
    }
    assert!(diag.method_for(MethodTag::HotellingLawley).is_some());
    assert!(diag.method_for(MethodTag::PillaiBartlett).is_some());
    assert!(diag.method_for(MethodTag::WilksLambda).is_some());
}

#[test]
fn power_all_degenerates_independently() {
    // At N=7 the one-moment HLT df2 collapses but PBT and WLK survive.
    let design = Design::new(2, 3, 4, 7).unwrap();
    let mut diag = Diagnostics::new();
    let all = power_all(
        &design,
        &scenario_eigenvalues(),
        &pillai_config(),
        &mut diag,
    )
    .unwrap();

    assert!(all.hlt.power.is_none());
    assert!(all.pbt.power.is_some());
    assert!(all.wlk.power.is_some());
    assert_eq!(diag.warning_count(WarningCode::DegenerateDf), 1);
}

#[test]
fn results_serialize() {
    let mut diag = Diagnostics::new();
    let all = power_all(
        &scenario_design(),
        &scenario_eigenvalues(),
        &PowerConfig::new(),
        &mut diag,
    )
    .unwrap();

    let json = serde_json::to_string(&all).unwrap();
    let back: glmpower::MultirepPower = serde_json::from_str(&json).unwrap();
    assert_eq!(all, back);

    let diag_json = serde_json::to_string(&diag).unwrap();
    let diag_back: Diagnostics = serde_json::from_str(&diag_json).unwrap();
    assert_eq!(diag.methods().len(), diag_back.methods().len());
}
