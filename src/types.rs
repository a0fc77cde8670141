//! Core input types: design ranks and eigenvalue sequences.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rank structure of a GLM design together with the total sample size.
///
/// `rank_c` is the rank of the between-subject contrast matrix, `rank_u` the
/// rank of the within-response transform matrix, `rank_x` the rank of the
/// design matrix, and `total_n` the number of observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    /// Rank of the C (contrast) matrix.
    pub rank_c: usize,
    /// Rank of the U (within-response transform) matrix.
    pub rank_u: usize,
    /// Rank of the X (design) matrix.
    pub rank_x: usize,
    /// Total number of observations.
    pub total_n: usize,
}

impl Design {
    /// Create a design, validating the calling contract.
    ///
    /// All ranks must be at least 1 and `total_n` must exceed `rank_x`. Note
    /// that `total_n - rank_x - rank_u - 1 <= 0` is NOT rejected here: a
    /// collapsed denominator df is an expected degenerate case that the power
    /// functions report through the diagnostics accumulator.
    pub fn new(rank_c: usize, rank_u: usize, rank_x: usize, total_n: usize) -> Result<Self> {
        let design = Self {
            rank_c,
            rank_u,
            rank_x,
            total_n,
        };
        design.validate()?;
        Ok(design)
    }

    /// Check the calling contract without constructing.
    pub fn validate(&self) -> Result<()> {
        if self.rank_c == 0 {
            return Err(Error::InvalidRank { name: "C" });
        }
        if self.rank_u == 0 {
            return Err(Error::InvalidRank { name: "U" });
        }
        if self.rank_x == 0 {
            return Err(Error::InvalidRank { name: "X" });
        }
        if self.total_n <= self.rank_x {
            return Err(Error::SampleSizeTooSmall {
                total_n: self.total_n,
                rank_x: self.rank_x,
            });
        }
        Ok(())
    }

    /// `min(rank_c, rank_u)`, the number of nonzero eigenvalues of H·E⁻¹.
    pub fn min_rank(&self) -> usize {
        self.rank_c.min(self.rank_u)
    }

    /// `total_n - rank_x`, the error df of the target study.
    pub fn error_df(&self) -> usize {
        self.total_n - self.rank_x
    }
}

/// Ordered eigenvalues of H·E⁻¹, with missing values represented explicitly.
///
/// The upstream eigenvalue estimation can fail; the conventional encoding for
/// that failure is a NaN in the sequence. Here a missing value is a typed
/// `None`, and the check for missingness is explicit rather than relying on
/// NaN propagation through the trace and product sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eigenvalues(Vec<Option<f64>>);

impl Eigenvalues {
    /// Wrap an already-typed sequence.
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self(values)
    }

    /// Convert a raw slice, mapping every non-finite entry to missing.
    pub fn from_slice(values: &[f64]) -> Self {
        Self(
            values
                .iter()
                .map(|&v| if v.is_finite() { Some(v) } else { None })
                .collect(),
        )
    }

    /// Number of eigenvalues (present or missing).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no eigenvalues were supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the sequence is empty or any entry is missing.
    ///
    /// Power derivation treats this exactly like a collapsed denominator df:
    /// the computation stops before any distribution call.
    pub fn any_missing(&self) -> bool {
        self.0.is_empty() || self.0.iter().any(Option::is_none)
    }

    /// Iterate over the present values. Callers must check
    /// [`Self::any_missing`] first; missing entries are skipped here.
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().filter_map(|v| *v)
    }

    /// Check the calling contract: present values must be nonnegative.
    ///
    /// Missing values pass here; they are an expected degenerate case, not a
    /// contract violation.
    pub fn validate(&self) -> Result<()> {
        match self.present().find(|&v| v < 0.0) {
            Some(value) => Err(Error::NegativeEigenvalue { value }),
            None => Ok(()),
        }
    }
}

impl From<&[f64]> for Eigenvalues {
    fn from(values: &[f64]) -> Self {
        Self::from_slice(values)
    }
}

impl<const N: usize> From<[f64; N]> for Eigenvalues {
    fn from(values: [f64; N]) -> Self {
        Self::from_slice(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_validates_ranks() {
        assert!(Design::new(2, 3, 4, 20).is_ok());
        assert_eq!(
            Design::new(0, 3, 4, 20).unwrap_err(),
            Error::InvalidRank { name: "C" }
        );
        assert_eq!(
            Design::new(2, 0, 4, 20).unwrap_err(),
            Error::InvalidRank { name: "U" }
        );
        assert_eq!(
            Design::new(2, 3, 0, 20).unwrap_err(),
            Error::InvalidRank { name: "X" }
        );
    }

    #[test]
    fn design_requires_n_above_rank_x() {
        assert_eq!(
            Design::new(2, 3, 4, 4).unwrap_err(),
            Error::SampleSizeTooSmall {
                total_n: 4,
                rank_x: 4
            }
        );
        // A collapsed denominator df is allowed through; it is handled later.
        assert!(Design::new(2, 3, 4, 7).is_ok());
    }

    #[test]
    fn design_accessors() {
        let d = Design::new(2, 3, 4, 20).unwrap();
        assert_eq!(d.min_rank(), 2);
        assert_eq!(d.error_df(), 16);
    }

    #[test]
    fn nan_maps_to_missing() {
        let e = Eigenvalues::from_slice(&[f64::NAN, 0.2]);
        assert!(e.any_missing());
        assert_eq!(e.len(), 2);
        assert_eq!(e.present().collect::<Vec<_>>(), vec![0.2]);
    }

    #[test]
    fn infinities_map_to_missing() {
        let e = Eigenvalues::from_slice(&[f64::INFINITY, 0.2]);
        assert!(e.any_missing());
    }

    #[test]
    fn empty_counts_as_missing() {
        assert!(Eigenvalues::from_slice(&[]).any_missing());
    }

    #[test]
    fn clean_sequence_is_not_missing() {
        let e = Eigenvalues::from([0.5, 0.2]);
        assert!(!e.any_missing());
        assert_eq!(e.present().sum::<f64>(), 0.7);
    }

    #[test]
    fn negative_values_violate_the_contract() {
        let e = Eigenvalues::from([0.5, -0.2]);
        assert_eq!(
            e.validate().unwrap_err(),
            Error::NegativeEigenvalue { value: -0.2 }
        );
        // Missing values are degenerate data, not contract violations.
        assert!(Eigenvalues::from_slice(&[f64::NAN]).validate().is_ok());
        assert!(Eigenvalues::from([0.5, 0.2]).validate().is_ok());
    }
}
