//! Confidence limits on power.
//!
//! The point power carries no uncertainty of its own; the uncertainty comes
//! from the study the effect and covariance estimates were taken from. For
//! each requested bound this module runs a monotone root search over a
//! candidate noncentrality λ: find the λ at which the probability that the
//! estimation study's statistic exceeds its observed value equals the
//! requested tail probability. The reference distribution depends on the
//! confidence-limit mode:
//!
//! - [`ClType::BetaKnown`]: only the covariance is estimated, so the
//!   noncentrality estimate scales as a central chi-square with
//!   `n_est - rank_est` df.
//! - [`ClType::BetaEstimated`]: the effect is estimated too, so the observed
//!   ratio follows a noncentral F evaluated through the usual
//!   [`crate::fdist::probf`] cascade.
//!
//! Each bound's λ is then converted back to a power value through the same
//! evaluator as the point estimate, with its own method record.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::config::ConfidenceConfig;
use crate::constants::{ClType, FMethod, MethodTag};
use crate::diagnostics::Diagnostics;
use crate::fdist::probf;
use crate::multirep::evaluate_power;

/// Bisection never brackets beyond this multiple of the observed
/// noncentrality; a root past the cap saturates the power bound at 1.
const BRACKET_CAP_FACTOR: f64 = 1e10;

/// Hard cap on bisection steps; the tolerance normally stops far earlier.
const MAX_BISECTIONS: usize = 500;

/// Solved confidence bounds, on both the power and noncentrality scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ClBounds {
    /// Lower confidence bound on power.
    pub power_lower: f64,
    /// Upper confidence bound on power.
    pub power_upper: f64,
    /// Numeric method used converting the lower noncentrality to power.
    pub method_lower: FMethod,
    /// Numeric method used converting the upper noncentrality to power.
    pub method_upper: FMethod,
    /// Lower confidence bound on the noncentrality.
    pub noncen_lower: f64,
    /// Upper confidence bound on the noncentrality.
    pub noncen_upper: f64,
}

/// Solve both confidence bounds for a computed noncentrality `omega` with
/// approximating df `(df1, df2)` and test size `alpha`.
///
/// `total_n` is the planned study's sample size; candidate noncentralities
/// are rescaled by `n_est / total_n` when interrogating the estimation
/// study's sampling distribution, since the noncentrality grows linearly
/// with the number of observations.
pub(crate) fn solve(
    omega: f64,
    df1: f64,
    df2: f64,
    alpha: f64,
    total_n: usize,
    config: &ConfidenceConfig,
    diag: &mut Diagnostics,
) -> ClBounds {
    debug_assert!(config.cl_type.is_desired(), "solver called without a CL request");
    let beta_known = matches!(config.cl_type, ClType::BetaKnown);
    let dfe1 = (config.n_est - config.rank_est) as f64;
    let est_scale = config.n_est as f64 / total_n as f64;
    let omega_est = omega * est_scale;
    // The F statistic the estimation study would report for this
    // noncentrality; the central noise floor contributes the leading 1.
    let f_est = 1.0 + omega_est / df1;
    let chi = ChiSquared::new(dfe1)
        .expect("estimation df should be positive after config validation");

    // Exceedance probability of the observed estimate under a candidate
    // target-scale noncentrality. Monotone increasing in the candidate.
    let exceedance = |lam: f64| -> f64 {
        let lam_est = lam * est_scale;
        if beta_known {
            if lam_est <= 0.0 {
                // chi-square argument diverges, survival vanishes
                return 0.0;
            }
            1.0 - chi.cdf(dfe1 * omega_est / lam_est)
        } else {
            let (prob, _) = probf(f_est, df1, dfe1, lam_est.max(0.0));
            1.0 - prob
        }
    };

    let start = omega.max(1.0);
    let noncen_lower = solve_bound(config.alpha_lower, &exceedance, start, config.tolerance);
    let noncen_upper = solve_bound(config.alpha_upper, &exceedance, start, config.tolerance);

    let (power_lower, method_lower) = evaluate_power(
        df1,
        df2,
        noncen_lower,
        alpha,
        MethodTag::ConfidenceLower,
        diag,
    );
    let (power_upper, method_upper) = evaluate_power(
        df1,
        df2,
        noncen_upper,
        alpha,
        MethodTag::ConfidenceUpper,
        diag,
    );

    ClBounds {
        power_lower,
        power_upper,
        method_lower,
        method_upper,
        noncen_lower,
        noncen_upper,
    }
}

/// Find λ with `exceedance(λ) = target` by bisection.
///
/// Saturates at 0 when even the smallest candidate exceeds the target (the
/// bound then evaluates to the test size), and at the bracket cap when no
/// finite candidate reaches it (the bound then evaluates to 1 through the
/// saturated probability path).
fn solve_bound(
    target: f64,
    exceedance: &impl Fn(f64) -> f64,
    start: f64,
    tolerance: f64,
) -> f64 {
    if exceedance(0.0) >= target {
        return 0.0;
    }

    let cap = BRACKET_CAP_FACTOR * start;
    let mut hi = start;
    while exceedance(hi) < target {
        hi *= 2.0;
        if hi > cap {
            return cap;
        }
    }

    let mut lo = 0.0;
    for _ in 0..MAX_BISECTIONS {
        if hi - lo <= tolerance {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if exceedance(mid) >= target {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    0.5 * (lo + hi)
}
