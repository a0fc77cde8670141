//! Multirep test statistics: power and confidence limits.
//!
//! Each statistic follows the same pipeline:
//!
//! 1. **Derivation**: ranks, sample size, and the method selector map to the
//!    approximating F distribution's `(df1, df2)` and the noncentrality Ω.
//!    A collapsed denominator df or a missing eigenvalue stops the pipeline
//!    here (diagnostic code 15, power reported missing).
//! 2. **Evaluation**: critical value from [`crate::fdist::finv`], exceedance
//!    from [`crate::fdist::probf`], method recorded in the diagnostics.
//! 3. **Confidence limits** (optional): the solver in [`crate::confidence`]
//!    inverts the power formula over the noncentrality parameter.
//!
//! The statistics differ only in step 1; the `hlt`, `pbt`, and `wlk`
//! submodules hold the per-statistic derivations.

mod hlt;
mod pbt;
mod wlk;

pub use hlt::hlt_power;
pub use pbt::pbt_power;
pub use wlk::wlk_power;

use serde::{Deserialize, Serialize};

use crate::confidence;
use crate::config::PowerConfig;
use crate::constants::{FMethod, MethodTag};
use crate::diagnostics::{Diagnostics, WarningCode};
use crate::error::Result;
use crate::fdist::{finv, probf};
use crate::types::{Design, Eigenvalues};

/// Power with optional confidence bounds.
///
/// `power` is `None` when the derivation hit a degenerate case (diagnostic
/// code 15 explains which). `lower`/`upper` are `None` whenever confidence
/// limits were not requested or power itself is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerInterval {
    /// Lower confidence bound on power.
    pub lower: Option<f64>,
    /// Point estimate of power.
    pub power: Option<f64>,
    /// Upper confidence bound on power.
    pub upper: Option<f64>,
}

impl PowerInterval {
    /// Interval with every field missing (the degenerate-derivation result).
    pub fn missing() -> Self {
        Self {
            lower: None,
            power: None,
            upper: None,
        }
    }

    /// True when the point power was computable.
    pub fn is_computable(&self) -> bool {
        self.power.is_some()
    }

    /// True when both confidence bounds are present.
    pub fn has_bounds(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }
}

/// Power intervals for all three multirep statistics on one design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultirepPower {
    /// Hotelling-Lawley Trace.
    pub hlt: PowerInterval,
    /// Pillai-Bartlett Trace.
    pub pbt: PowerInterval,
    /// Wilks' Lambda.
    pub wlk: PowerInterval,
}

/// Compute all three multirep statistics with one configuration.
///
/// Every statistic appends to the same diagnostics accumulator; the per-tag
/// method records keep them distinguishable.
pub fn power_all(
    design: &Design,
    eigenvalues: &Eigenvalues,
    config: &PowerConfig,
    diag: &mut Diagnostics,
) -> Result<MultirepPower> {
    Ok(MultirepPower {
        hlt: hlt_power(design, eigenvalues, config, diag)?,
        pbt: pbt_power(design, eigenvalues, config, diag)?,
        wlk: wlk_power(design, eigenvalues, config, diag)?,
    })
}

/// Approximating F distribution and noncentrality for one statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Derivation {
    /// Numerator df of the approximating F.
    pub df1: f64,
    /// Denominator df of the approximating F.
    pub df2: f64,
    /// Noncentrality parameter Ω.
    pub omega: f64,
}

/// Evaluate power for a derived `(df1, df2, Ω)` at test size `alpha`,
/// recording the numeric method under `tag`.
///
/// The floor rule: when `probf` exhausted its fallbacks (method code 4) and
/// reports a probability of exactly 1, power is the nominal test size rather
/// than 0. The exact floating-point equality is intentional, documented
/// behavior; do not loosen it.
pub(crate) fn evaluate_power(
    df1: f64,
    df2: f64,
    omega: f64,
    alpha: f64,
    tag: MethodTag,
    diag: &mut Diagnostics,
) -> (f64, FMethod) {
    let fcrit = finv(1.0 - alpha, df1, df2);
    let (prob, fmethod) = probf(fcrit, df1, df2, omega);
    diag.record_method(fmethod, tag);
    let power = if fmethod == FMethod::NormalSaturated && prob == 1.0 {
        alpha
    } else {
        1.0 - prob
    };
    (power, fmethod)
}

/// Shared tail of every statistic's power function: run the evaluator on a
/// successful derivation, then the confidence-limit solver if requested.
///
/// A failed derivation (code 15 already recorded by the caller) yields the
/// all-missing interval; if confidence limits were requested on top of it,
/// code 16 records that the solver was skipped.
pub(crate) fn finish(
    derivation: Option<Derivation>,
    design: &Design,
    config: &PowerConfig,
    tag: MethodTag,
    diag: &mut Diagnostics,
) -> PowerInterval {
    let cl = &config.confidence;
    let Some(d) = derivation else {
        if cl.cl_type.is_desired() {
            diag.record_unconditional(WarningCode::PowerMissingForCl);
        }
        return PowerInterval::missing();
    };

    let (power, _) = evaluate_power(d.df1, d.df2, d.omega, config.alpha, tag, diag);

    if !cl.cl_type.is_desired() {
        return PowerInterval {
            lower: None,
            power: Some(power),
            upper: None,
        };
    }

    let bounds = confidence::solve(d.omega, d.df1, d.df2, config.alpha, design.total_n, cl, diag);
    PowerInterval {
        lower: Some(bounds.power_lower),
        power: Some(power),
        upper: Some(bounds.power_upper),
    }
}
