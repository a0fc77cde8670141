//! Central F quantile.

use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Quantile of the central F distribution with `df1` and `df2` degrees of
/// freedom: the value `x` with `P(F <= x) = p`.
///
/// Degrees of freedom may be non-integer (the two-moment approximations
/// produce fractional denominator df). Callers guarantee `df1 > 0`,
/// `df2 > 0`, and `p` in (0, 1).
pub fn finv(p: f64, df1: f64, df2: f64) -> f64 {
    let dist = FisherSnedecor::new(df1, df2)
        .expect("degrees of freedom should be positive after derivation checks");
    dist.inverse_cdf(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_symmetric_case() {
        // F(d, d) has median exactly 1.
        let q = finv(0.5, 7.0, 7.0);
        assert!((q - 1.0).abs() < 1e-6, "median was {}", q);
    }

    #[test]
    fn matches_tabulated_critical_value() {
        // F_{0.95; 6, 17} from standard tables.
        let q = finv(0.95, 6.0, 17.0);
        assert!((q - 2.70).abs() < 0.01, "critical value was {}", q);
    }

    #[test]
    fn fractional_denominator_df() {
        let q = finv(0.95, 6.0, 17.3);
        assert!(q.is_finite() && q > 0.0);
        // Between the integer-df neighbours.
        let lo = finv(0.95, 6.0, 18.0);
        let hi = finv(0.95, 6.0, 17.0);
        assert!(q > lo && q < hi, "{} not in ({}, {})", q, lo, hi);
    }

    #[test]
    fn quantile_is_monotone_in_p() {
        let q50 = finv(0.50, 3.0, 12.0);
        let q90 = finv(0.90, 3.0, 12.0);
        let q99 = finv(0.99, 3.0, 12.0);
        assert!(q50 < q90 && q90 < q99);
    }
}
