//! Approximation-method selectors and related enumerations.
//!
//! Each multirep statistic has a small set of published approximations for its
//! null distribution and noncentrality. These are pure configuration data: the
//! enums carry no behavior, they are consumed by the dispatch logic in
//! [`crate::multirep`]. Discriminants match the method codes used in the
//! statistical literature implementations, so `code()` round-trips with
//! published tables.

use serde::{Deserialize, Serialize};

// =============================================================================
// Per-statistic approximation methods
// =============================================================================

/// Approximation methods for the Hotelling-Lawley Trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HltApprox {
    /// Pillai (1954, 55) one-moment null approximation.
    Pillai = 1,
    /// McKeon (1974) two-moment null approximation.
    McKeon = 2,
    /// Pillai (1959) one-moment null approximation with the O'Brien-Shieh
    /// noncentrality multiplier.
    PillaiObrienShieh = 3,
    /// McKeon (1974) two-moment null approximation with the O'Brien-Shieh
    /// noncentrality multiplier.
    McKeonObrienShieh = 4,
}

impl HltApprox {
    /// Published method code (1-4).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for the one-moment variants (codes 1 and 3).
    pub fn is_one_moment(self) -> bool {
        matches!(self, HltApprox::Pillai | HltApprox::PillaiObrienShieh)
    }

    /// True for the variants that apply the O'Brien-Shieh eigenvalue scaling.
    pub fn is_obrien_shieh(self) -> bool {
        matches!(
            self,
            HltApprox::PillaiObrienShieh | HltApprox::McKeonObrienShieh
        )
    }
}

/// Approximation methods for the Pillai-Bartlett Trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PbtApprox {
    /// Pillai (1954, 55) one-moment null approximation.
    Pillai = 1,
    /// Muller (1998) two-moment null approximation.
    Muller = 2,
    /// Pillai (1959) one-moment null approximation with the O'Brien-Shieh
    /// noncentrality multiplier.
    PillaiObrienShieh = 3,
    /// Muller (1998) two-moment null approximation with the O'Brien-Shieh
    /// noncentrality multiplier.
    MullerObrienShieh = 4,
}

impl PbtApprox {
    /// Published method code (1-4).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for the one-moment variants (codes 1 and 3).
    pub fn is_one_moment(self) -> bool {
        matches!(self, PbtApprox::Pillai | PbtApprox::PillaiObrienShieh)
    }

    /// True for the variants that apply the O'Brien-Shieh eigenvalue scaling.
    pub fn is_obrien_shieh(self) -> bool {
        matches!(
            self,
            PbtApprox::PillaiObrienShieh | PbtApprox::MullerObrienShieh
        )
    }
}

/// Approximation methods for Wilks' Lambda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WlkApprox {
    /// Rao (1951) two-moment null approximation.
    Rao = 1,
    /// Rao (1951) two-moment null approximation with the O'Brien-Shieh
    /// noncentrality multiplier.
    RaoObrienShieh = 2,
}

impl WlkApprox {
    /// Published method code (1-2).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for the variant that applies the O'Brien-Shieh eigenvalue scaling.
    pub fn is_obrien_shieh(self) -> bool {
        matches!(self, WlkApprox::RaoObrienShieh)
    }
}

// =============================================================================
// Selector bundle
// =============================================================================

/// The three-slot approximation selector, one slot per multirep statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSelector {
    /// Method for the Hotelling-Lawley Trace.
    pub hlt: HltApprox,
    /// Method for the Pillai-Bartlett Trace.
    pub pbt: PbtApprox,
    /// Method for Wilks' Lambda.
    pub wlk: WlkApprox,
}

impl Default for MethodSelector {
    /// The conventional default selector: HLT code 4, PBT code 2, WLK code 2.
    fn default() -> Self {
        Self {
            hlt: HltApprox::McKeonObrienShieh,
            pbt: PbtApprox::Muller,
            wlk: WlkApprox::RaoObrienShieh,
        }
    }
}

// =============================================================================
// Confidence-limit mode
// =============================================================================

/// Whether confidence limits on power are computed, and under which
/// estimation assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClType {
    /// Confidence limits not desired.
    #[default]
    NotDesired,
    /// Effect (beta) known, covariance (sigma) estimated.
    BetaKnown,
    /// Both effect and covariance estimated.
    BetaEstimated,
}

impl ClType {
    /// True when confidence limits should be computed.
    pub fn is_desired(self) -> bool {
        !matches!(self, ClType::NotDesired)
    }
}

// =============================================================================
// Numeric-method bookkeeping
// =============================================================================

/// Which numeric path the noncentral F probability came from.
///
/// Code 4 is the exhausted fallback: the normal approximation's z-score left
/// the usable range and the probability saturated to exactly 0 or 1. The
/// power evaluator treats (code 4, probability exactly 1) specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FMethod {
    /// Exact noncentral F CDF via the Poisson-mixture series.
    NoncentralSeries = 1,
    /// Moment-matched central F approximation.
    MomentMatched = 2,
    /// Severo-Zelen normal approximation, |z| within range.
    NormalApprox = 3,
    /// Normal approximation with |z| out of range; probability saturated.
    NormalSaturated = 4,
}

impl FMethod {
    /// Numeric method code (1-4).
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Which computation a recorded numeric method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodTag {
    /// Point-estimate power for the Hotelling-Lawley Trace.
    HotellingLawley,
    /// Point-estimate power for the Pillai-Bartlett Trace.
    PillaiBartlett,
    /// Point-estimate power for Wilks' Lambda.
    WilksLambda,
    /// Lower confidence bound on power.
    ConfidenceLower,
    /// Upper confidence bound on power.
    ConfidenceUpper,
}
