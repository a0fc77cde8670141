//! Wilks' Lambda.
//!
//! The population value `W = Π 1/(1+λᵢ)` lives in (0, 1]; Rao's (1951)
//! two-moment F approximation handles the null distribution, with the exact
//! F form when `min(rank_C, rank_U) = 1`. The "+OS" variant applies the
//! O'Brien-Shieh eigenvalue scaling and sample-size noncentrality multiplier.

use crate::config::PowerConfig;
use crate::constants::MethodTag;
use crate::diagnostics::{Diagnostics, WarningCode};
use crate::error::Result;
use crate::multirep::{finish, Derivation, PowerInterval};
use crate::types::{Design, Eigenvalues};

/// Power (and confidence limits if requested) for Wilks' Lambda.
pub fn wlk_power(
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
        MethodTag::WilksLambda,
        diag,
    ))
}

/// Derive `(df1, df2, Ω)` for the lambda, or record code 15 and bail.
fn derive(
    design: &Design,
    eigenvalues: &Eigenvalues,
    config: &PowerConfig,
    diag: &mut Diagnostics,
) -> Option<Derivation> {
    let method = config.methods.wlk;
    let rank_c = design.rank_c as f64;
    let rank_u = design.rank_u as f64;
    let total_n = design.total_n as f64;
    let s = design.min_rank() as f64;
    let error_df = design.error_df() as f64;

    if eigenvalues.any_missing() {
        diag.record_unconditional(WarningCode::DegenerateDf);
        return None;
    }

    let os_scale = if method.is_obrien_shieh() {
        error_df / total_n
    } else {
        1.0
    };
    let lambda: f64 = eigenvalues
        .present()
        .map(|ev| 1.0 / (1.0 + ev * os_scale))
        .product();

    let df1 = rank_c * rank_u;
    let (df2, rs, tempw) = if s == 1.0 {
        // Exact F transform for a single nonzero eigenvalue.
        (total_n - design.rank_x as f64 - rank_u + 1.0, 1.0, lambda)
    } else {
        let rm = error_df - (rank_u - rank_c + 1.0) / 2.0;
        let rs = ((rank_c * rank_c * rank_u * rank_u - 4.0)
            / (rank_c * rank_c + rank_u * rank_u - 5.0))
            .sqrt();
        let tempw = lambda.powf(1.0 / rs);
        (rm * rs - (rank_c * rank_u - 2.0) / 2.0, rs, tempw)
    };

    if !(df2 > 0.0 && df2.is_finite()) || tempw <= 0.0 {
        diag.record_unconditional(WarningCode::DegenerateDf);
        return None;
    }

    let omega = if method.is_obrien_shieh() {
        total_n * rs * (1.0 - tempw) / tempw
    } else {
        df2 * (1.0 - tempw) / tempw
    };

    Some(Derivation { df1, df2, omega })
}
