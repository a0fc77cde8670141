//! # glmpower
//!
//! Statistical power for multivariate hypothesis tests under the general
//! linear model, with optional confidence limits on power.
//!
//! The crate computes the probability that a multirep test statistic
//! (Hotelling-Lawley Trace, Pillai-Bartlett Trace, or Wilks' Lambda)
//! correctly rejects the null hypothesis, given:
//!
//! - The rank structure of the design (ranks of the C, U, and X matrices)
//!   and the total sample size.
//! - The eigenvalues of H·E⁻¹, the hypothesis-by-inverse-error product
//!   (either supplied directly or extracted from the SSH/SSE matrices via
//!   [`eigen`]).
//! - An approximation method per statistic, chosen from the published
//!   one- and two-moment null approximations.
//!
//! Expected statistical degeneracies (a collapsed denominator df, a missing
//! eigenvalue estimate) are data, not errors: power comes back as `None`
//! and the caller-owned [`Diagnostics`] accumulator explains why. Only
//! inputs outside the documented calling contract produce an [`Error`].
//!
//! ## Quick start
//!
//! ```
//! use glmpower::{Design, Diagnostics, Eigenvalues, PowerConfig};
//! use glmpower::multirep::hlt_power;
//!
//! let design = Design::new(2, 3, 4, 40)?;
//! let eigenvalues = Eigenvalues::from([0.5, 0.2]);
//! let config = PowerConfig::new();
//! let mut diagnostics = Diagnostics::new();
//!
//! let interval = hlt_power(&design, &eigenvalues, &config, &mut diagnostics)?;
//! let power = interval.power.expect("inputs are non-degenerate");
//! assert!(power > 0.0 && power < 1.0);
//! # Ok::<(), glmpower::Error>(())
//! ```
//!
//! ## Confidence limits
//!
//! When the eigenvalues come from an earlier study rather than from known
//! population values, power inherits that estimation uncertainty. Request
//! limits through the configuration and the solver inverts the power formula
//! over the noncentrality parameter:
//!
//! ```
//! use glmpower::{ClType, Design, Diagnostics, Eigenvalues, PowerConfig};
//! use glmpower::multirep::hlt_power;
//!
//! let design = Design::new(2, 3, 4, 40)?;
//! let eigenvalues = Eigenvalues::from([0.5, 0.2]);
//! let config = PowerConfig::new().confidence(ClType::BetaKnown, 24, 4);
//! let mut diagnostics = Diagnostics::new();
//!
//! let interval = hlt_power(&design, &eigenvalues, &config, &mut diagnostics)?;
//! assert!(interval.lower.unwrap() <= interval.power.unwrap());
//! assert!(interval.power.unwrap() <= interval.upper.unwrap());
//! # Ok::<(), glmpower::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod eigen;
pub mod error;
pub mod fdist;
pub mod multirep;
pub mod types;

mod confidence;

// Re-exports for the public API.
pub use config::{ConfidenceConfig, PowerConfig};
pub use constants::{ClType, FMethod, HltApprox, MethodSelector, MethodTag, PbtApprox, WlkApprox};
pub use diagnostics::{Diagnostics, MethodRecord, WarningCode};
pub use error::{Error, Result};
pub use multirep::{power_all, MultirepPower, PowerInterval};
pub use types::{Design, Eigenvalues};
