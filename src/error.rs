//! Contract-violation errors.
//!
//! Inputs outside the documented domain fail loudly with a typed error before
//! any numeric work happens. Expected statistical degeneracies (collapsed
//! denominator df, missing eigenvalues) are NOT errors: they travel as missing
//! power values plus diagnostic codes. The two channels never mix.

use thiserror::Error as ThisError;

/// Error for inputs outside the documented calling contract.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// A matrix rank input was zero.
    #[error("rank of {name} must be at least 1")]
    InvalidRank {
        /// Which rank input was invalid ("C", "U", or "X").
        name: &'static str,
    },

    /// Total sample size does not exceed the design matrix rank.
    #[error("total_n ({total_n}) must exceed rank_x ({rank_x})")]
    SampleSizeTooSmall {
        /// Total number of observations.
        total_n: usize,
        /// Rank of the design matrix.
        rank_x: usize,
    },

    /// A tail probability was outside the open interval (0, 1).
    #[error("{name} must lie strictly between 0 and 1, got {value}")]
    InvalidTailProbability {
        /// Which probability input was invalid.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The estimation-study design cannot produce a positive error df.
    #[error("n_est ({n_est}) must exceed rank_est ({rank_est})")]
    InvalidEstimationDesign {
        /// Sample size of the study the effect/covariance estimates came from.
        n_est: usize,
        /// Rank of that study's design matrix.
        rank_est: usize,
    },

    /// The root-search tolerance was not a positive finite number.
    #[error("tolerance must be positive and finite, got {value}")]
    InvalidTolerance {
        /// The offending value.
        value: f64,
    },

    /// An eigenvalue of H·E⁻¹ was negative. The product of a positive
    /// semidefinite hypothesis matrix and an inverted positive definite
    /// error matrix cannot have one.
    #[error("eigenvalues of H*inv(E) must be nonnegative, got {value}")]
    NegativeEigenvalue {
        /// The offending value.
        value: f64,
    },

    /// Matrix inputs to the eigenvalue extraction have incompatible shapes.
    #[error("hypothesis and error matrices must be square with equal size, got {h_rows}x{h_cols} and {e_rows}x{e_cols}")]
    DimensionMismatch {
        /// Rows of the hypothesis matrix.
        h_rows: usize,
        /// Columns of the hypothesis matrix.
        h_cols: usize,
        /// Rows of the error matrix.
        e_rows: usize,
        /// Columns of the error matrix.
        e_cols: usize,
    },

    /// The error sums-of-squares matrix is not positive definite.
    #[error("error matrix must be symmetric positive definite")]
    NotPositiveDefinite,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = Error::SampleSizeTooSmall {
            total_n: 4,
            rank_x: 4,
        };
        assert_eq!(err.to_string(), "total_n (4) must exceed rank_x (4)");

        let err = Error::InvalidTailProbability {
            name: "alpha",
            value: 1.5,
        };
        assert!(err.to_string().contains("alpha"));
        assert!(err.to_string().contains("1.5"));
    }
}
