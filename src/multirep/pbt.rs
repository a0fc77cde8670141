//! Pillai-Bartlett Trace.
//!
//! The population trace `V = Σ λᵢ/(1+λᵢ)` lives in [0, s); its null
//! distribution is approximated by one-moment (Pillai 1954, 55 and 1959) or
//! two-moment (Muller 1998) matching, with the O'Brien-Shieh eigenvalue
//! scaling in the "+OS" variants.

use crate::config::PowerConfig;
use crate::constants::MethodTag;
use crate::diagnostics::{Diagnostics, WarningCode};
use crate::error::Result;
use crate::multirep::{finish, Derivation, PowerInterval};
use crate::types::{Design, Eigenvalues};

/// Power (and confidence limits if requested) for the Pillai-Bartlett Trace.
pub fn pbt_power(
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
        MethodTag::PillaiBartlett,
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
    let method = config.methods.pbt;
    let rank_c = design.rank_c as f64;
    let rank_u = design.rank_u as f64;
    let total_n = design.total_n as f64;
    let s = design.min_rank() as f64;
    let error_df = design.error_df() as f64;

    let (df1, df2) = if method.is_one_moment() {
        (rank_c * rank_u, s * (error_df + s - rank_u))
    } else {
        // Muller's two-moment match of the scaled null trace V/s against a
        // beta distribution, expressed as F degrees of freedom.
        let mu1 = rank_c * rank_u / (error_df + rank_c);
        let factor1 = (error_df + rank_c - rank_u) / (error_df + rank_c - 1.0);
        let factor2 = error_df / (error_df + rank_c + 2.0);
        let variance =
            2.0 * rank_c * rank_u * factor1 * factor2 / ((error_df + rank_c) * (error_df + rank_c));
        let mu2 = variance + mu1 * mu1;
        let m1 = mu1 / s;
        let m2 = mu2 / (s * s);
        let denom = m2 - m1 * m1;
        (
            2.0 * m1 * (m1 - m2) / denom,
            2.0 * (m1 - m2) * (1.0 - m1) / denom,
        )
    };

    // The two-moment formulas can degenerate to NaN or negative df at very
    // small error df; every such shape is the same non-computable case.
    if !(df1 > 0.0 && df1.is_finite()) || !(df2 > 0.0 && df2.is_finite()) || eigenvalues.any_missing()
    {
        diag.record_unconditional(WarningCode::DegenerateDf);
        return None;
    }

    let os_scale = if method.is_obrien_shieh() {
        error_df / total_n
    } else {
        1.0
    };
    let trace: f64 = eigenvalues
        .present()
        .map(|ev| {
            let ev = ev * os_scale;
            ev / (1.0 + ev)
        })
        .sum();

    // V saturating at s leaves the noncentrality undefined.
    if s - trace <= 0.0 {
        diag.record_unconditional(WarningCode::DegenerateDf);
        return None;
    }

    let omega = if method.is_obrien_shieh() {
        total_n * s * trace / (s - trace)
    } else {
        df2 * trace / (s - trace)
    };

    Some(Derivation { df1, df2, omega })
}
