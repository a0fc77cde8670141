//! Eigenvalues of the hypothesis-by-inverse-error product.
//!
//! Callers that hold the hypothesis (SSH) and error (SSE) sums-of-squares
//! matrices rather than pre-computed eigenvalues can extract the eigenvalue
//! input here. H·E⁻¹ is not symmetric, but it shares its spectrum with the
//! symmetric L⁻¹·H·L⁻ᵀ where E = L·Lᵀ, so the whitened form goes through a
//! symmetric eigendecomposition.

use nalgebra::{Cholesky, DMatrix, SymmetricEigen};

use crate::error::{Error, Result};
use crate::types::Eigenvalues;

/// Eigenvalues of H·E⁻¹, descending.
///
/// `h` must be symmetric and `e` symmetric positive definite, both of the
/// same square dimension.
pub fn hinve_eigenvalues(h: &DMatrix<f64>, e: &DMatrix<f64>) -> Result<Vec<f64>> {
    if h.nrows() != h.ncols() || e.nrows() != e.ncols() || h.nrows() != e.nrows() {
        return Err(Error::DimensionMismatch {
            h_rows: h.nrows(),
            h_cols: h.ncols(),
            e_rows: e.nrows(),
            e_cols: e.ncols(),
        });
    }

    let chol = Cholesky::new(e.clone()).ok_or(Error::NotPositiveDefinite)?;
    let l = chol.l();

    // W = L⁻¹ H L⁻ᵀ via two triangular solves.
    let a = l
        .solve_lower_triangular(h)
        .ok_or(Error::NotPositiveDefinite)?;
    let w = l
        .solve_lower_triangular(&a.transpose())
        .ok_or(Error::NotPositiveDefinite)?
        .transpose();

    let mut values: Vec<f64> = SymmetricEigen::new(w).eigenvalues.iter().copied().collect();
    values.sort_by(|a, b| b.total_cmp(a));
    Ok(values)
}

/// [`hinve_eigenvalues`] packaged directly as the engine's input type.
pub fn hinve(h: &DMatrix<f64>, e: &DMatrix<f64>) -> Result<Eigenvalues> {
    Ok(Eigenvalues::from_slice(&hinve_eigenvalues(h, e)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_error_returns_h_spectrum() {
        let h = DMatrix::from_diagonal(&nalgebra::dvector![2.0, 1.0]);
        let e = DMatrix::identity(2, 2);
        let values = hinve_eigenvalues(&h, &e).unwrap();
        assert!((values[0] - 2.0).abs() < 1e-12);
        assert!((values[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn diagonal_case_matches_hand_computation() {
        // H = diag(2, 3), E = diag(2, 1): H E^-1 = diag(1, 3).
        let h = DMatrix::from_diagonal(&nalgebra::dvector![2.0, 3.0]);
        let e = DMatrix::from_diagonal(&nalgebra::dvector![2.0, 1.0]);
        let values = hinve_eigenvalues(&h, &e).unwrap();
        assert!((values[0] - 3.0).abs() < 1e-12, "{:?}", values);
        assert!((values[1] - 1.0).abs() < 1e-12, "{:?}", values);
    }

    #[test]
    fn dense_symmetric_case() {
        let h = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 1.0]);
        let e = DMatrix::from_row_slice(2, 2, &[2.0, 0.3, 0.3, 1.5]);
        let values = hinve_eigenvalues(&h, &e).unwrap();
        assert_eq!(values.len(), 2);
        assert!(values[0] >= values[1]);
        // Spectrum invariant: trace(H E^-1) equals the eigenvalue sum.
        let e_inv = e.clone().try_inverse().unwrap();
        let trace = (h * e_inv).trace();
        let sum: f64 = values.iter().sum();
        assert!((trace - sum).abs() < 1e-10, "{} vs {}", trace, sum);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let h = DMatrix::identity(2, 2);
        let e = DMatrix::identity(3, 3);
        assert!(matches!(
            hinve_eigenvalues(&h, &e).unwrap_err(),
            Error::DimensionMismatch { .. }
        ));
    }

    #[test]
    fn indefinite_error_matrix_is_rejected() {
        let h = DMatrix::identity(2, 2);
        let e = DMatrix::from_diagonal(&nalgebra::dvector![1.0, -1.0]);
        assert_eq!(
            hinve_eigenvalues(&h, &e).unwrap_err(),
            Error::NotPositiveDefinite
        );
    }

    #[test]
    fn packaged_form_has_no_missing_values() {
        let h = DMatrix::identity(2, 2);
        let e = DMatrix::identity(2, 2);
        let eigs = hinve(&h, &e).unwrap();
        assert!(!eigs.any_missing());
        assert_eq!(eigs.len(), 2);
    }
}
