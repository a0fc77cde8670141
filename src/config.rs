//! Configuration for power computations.

use serde::{Deserialize, Serialize};

use crate::constants::{ClType, MethodSelector};
use crate::error::{Error, Result};

/// Default test size.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default tail probabilities for a 95% confidence interval on power.
pub const DEFAULT_ALPHA_LOWER: f64 = 0.025;
/// See [`DEFAULT_ALPHA_LOWER`].
pub const DEFAULT_ALPHA_UPPER: f64 = 0.975;

/// Default convergence tolerance of the confidence-limit root search, on the
/// noncentrality scale.
pub const DEFAULT_CL_TOLERANCE: f64 = 1e-6;

/// Confidence-limit settings.
///
/// `n_est` and `rank_est` describe the study the effect/covariance estimates
/// came from; they matter only when `cl_type` requests limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Whether limits are computed and under which estimation assumption.
    pub cl_type: ClType,
    /// Sample size of the estimation study.
    pub n_est: usize,
    /// Rank of the estimation study's design matrix.
    pub rank_est: usize,
    /// Tail probability defining the lower bound.
    pub alpha_lower: f64,
    /// Tail probability defining the upper bound.
    pub alpha_upper: f64,
    /// Root-search convergence bound on the noncentrality scale.
    pub tolerance: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            cl_type: ClType::NotDesired,
            n_est: 0,
            rank_est: 0,
            alpha_lower: DEFAULT_ALPHA_LOWER,
            alpha_upper: DEFAULT_ALPHA_UPPER,
            tolerance: DEFAULT_CL_TOLERANCE,
        }
    }
}

impl ConfidenceConfig {
    /// Check the calling contract. Estimation-study fields are only
    /// validated when limits are actually requested.
    pub fn validate(&self) -> Result<()> {
        if !self.cl_type.is_desired() {
            return Ok(());
        }
        if self.rank_est == 0 || self.n_est <= self.rank_est {
            return Err(Error::InvalidEstimationDesign {
                n_est: self.n_est,
                rank_est: self.rank_est,
            });
        }
        for (name, value) in [
            ("alpha_lower", self.alpha_lower),
            ("alpha_upper", self.alpha_upper),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(Error::InvalidTailProbability { name, value });
            }
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(Error::InvalidTolerance {
                value: self.tolerance,
            });
        }
        Ok(())
    }
}

/// Top-level configuration: test size, approximation methods, and optional
/// confidence limits.
///
/// # Example
///
/// ```
/// use glmpower::config::PowerConfig;
/// use glmpower::constants::ClType;
///
/// let config = PowerConfig::new()
///     .alpha(0.01)
///     .confidence(ClType::BetaKnown, 24, 4);
/// assert_eq!(config.alpha, 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerConfig {
    /// Size of the test.
    pub alpha: f64,
    /// Approximation method per statistic.
    pub methods: MethodSelector,
    /// Confidence-limit settings.
    pub confidence: ConfidenceConfig,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerConfig {
    /// Create with defaults: alpha 0.05, the conventional method selector,
    /// confidence limits not desired.
    pub fn new() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            methods: MethodSelector::default(),
            confidence: ConfidenceConfig::default(),
        }
    }

    /// Set the test size.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the approximation methods for all three statistics.
    pub fn methods(mut self, methods: MethodSelector) -> Self {
        self.methods = methods;
        self
    }

    /// Request confidence limits with the given mode and estimation study.
    pub fn confidence(mut self, cl_type: ClType, n_est: usize, rank_est: usize) -> Self {
        self.confidence.cl_type = cl_type;
        self.confidence.n_est = n_est;
        self.confidence.rank_est = rank_est;
        self
    }

    /// Set the confidence tail probabilities.
    pub fn confidence_tails(mut self, alpha_lower: f64, alpha_upper: f64) -> Self {
        self.confidence.alpha_lower = alpha_lower;
        self.confidence.alpha_upper = alpha_upper;
        self
    }

    /// Set the confidence root-search tolerance.
    pub fn confidence_tolerance(mut self, tolerance: f64) -> Self {
        self.confidence.tolerance = tolerance;
        self
    }

    /// Check the calling contract.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::InvalidTailProbability {
                name: "alpha",
                value: self.alpha,
            });
        }
        self.confidence.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PowerConfig::new().validate().is_ok());
    }

    #[test]
    fn alpha_out_of_range_is_rejected() {
        assert!(PowerConfig::new().alpha(0.0).validate().is_err());
        assert!(PowerConfig::new().alpha(1.0).validate().is_err());
        assert!(PowerConfig::new().alpha(-0.5).validate().is_err());
    }

    #[test]
    fn estimation_design_checked_only_when_desired() {
        // NotDesired ignores the zeroed estimation fields.
        assert!(PowerConfig::new().validate().is_ok());

        let requested = PowerConfig::new().confidence(ClType::BetaKnown, 0, 0);
        assert!(matches!(
            requested.validate().unwrap_err(),
            Error::InvalidEstimationDesign { .. }
        ));

        let ok = PowerConfig::new().confidence(ClType::BetaKnown, 20, 4);
        assert!(ok.validate().is_ok());

        let degenerate = PowerConfig::new().confidence(ClType::BetaEstimated, 4, 4);
        assert!(degenerate.validate().is_err());
    }

    #[test]
    fn tails_and_tolerance_checked_when_desired() {
        let base = PowerConfig::new().confidence(ClType::BetaKnown, 20, 4);
        assert!(base.confidence_tails(0.0, 0.975).validate().is_err());
        assert!(base.confidence_tails(0.025, 1.0).validate().is_err());
        assert!(base.confidence_tolerance(0.0).validate().is_err());
        assert!(base.confidence_tolerance(f64::NAN).validate().is_err());
        assert!(base.validate().is_ok());
    }
}
