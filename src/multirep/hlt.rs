//! Hotelling-Lawley Trace.
//!
//! Power is computed through the Pillai F approximation of the trace's null
//! distribution: one-moment (Pillai 1954, 55 and 1959) or two-moment
//! (McKeon 1974) matching, each with or without the O'Brien-Shieh
//! noncentrality multiplier.

use crate::config::PowerConfig;
use crate::constants::MethodTag;
use crate::diagnostics::{Diagnostics, WarningCode};
use crate::error::Result;
use crate::multirep::{finish, Derivation, PowerInterval};
use crate::types::{Design, Eigenvalues};

/// Power (and confidence limits if requested) for the Hotelling-Lawley Trace.
///
/// The eigenvalues are those of H·E⁻¹ for the hypothesis being tested. A
/// missing eigenvalue or a non-positive denominator df yields the missing
/// interval with diagnostic code 15.
pub fn hlt_power(
    design: &Design,
    eigenvalues: &Eigenvalues,
    config: &PowerConfig,
    diag: &mut Diagnostics,
) -> Result<PowerInterval> {
    design.validate()?;
    config.validate()?;
    eigenvalues.validate()?;
    let derivation = derive(design, eigenvalues, config, diag);
    Ok(finish(
        derivation,
        design,
        config,
        MethodTag::HotellingLawley,
        diag,
    ))
}

/// Derive `(df1, df2, Ω)` for the trace, or record code 15 and bail.
fn derive(
    design: &Design,
    eigenvalues: &Eigenvalues,
    config: &PowerConfig,
    diag: &mut Diagnostics,
) -> Option<Derivation> {
    let method = config.methods.hlt;
    let rank_c = design.rank_c as f64;
    let rank_u = design.rank_u as f64;
    let total_n = design.total_n as f64;
    let s = design.min_rank() as f64;
    let error_df = design.error_df() as f64;

    let df1 = rank_c * rank_u;
    let df2 = if method.is_one_moment() {
        s * (total_n - design.rank_x as f64 - rank_u - 1.0) + 2.0
    } else {
        // McKeon's two-moment match: the denominator df that equates the
        // first two null moments of the trace with an F distribution.
        let nu = error_df * error_df - error_df * (2.0 * rank_u + 3.0) + rank_u * (rank_u + 3.0);
        let de = error_df * (rank_c + rank_u + 1.0) - (rank_c + 2.0 * rank_u + rank_u * rank_u - 1.0);
        4.0 + (rank_c * rank_u + 2.0) * (nu / de)
    };

    // McKeon's ratio can degenerate to NaN when its denominator vanishes at
    // very small error df; every such shape is the same non-computable case.
    if !(df2 > 0.0 && df2.is_finite()) || eigenvalues.any_missing() {
        diag.record_unconditional(WarningCode::DegenerateDf);
        return None;
    }

    let omega = if method.is_one_moment() && s > 1.0 {
        // Population trace from deflated eigenvalues; noncentrality scales
        // with the total sample size.
        let trace: f64 = eigenvalues.present().map(|ev| ev * error_df / total_n).sum();
        total_n * s * (trace / s)
    } else {
        let trace: f64 = eigenvalues.present().sum();
        df2 * (trace / s)
    };

    Some(Derivation { df1, df2, omega })
}
