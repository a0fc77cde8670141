//! Per-computation diagnostics accumulator.
//!
//! One `Diagnostics` instance lives for exactly one power-plus-confidence-limit
//! computation. The power functions append to it, the caller reads it after
//! the call returns, then drops it. Recording never affects the numeric
//! result and never fails.

use serde::{Deserialize, Serialize};

use crate::constants::{FMethod, MethodTag};

/// Warning codes for degenerate conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningCode {
    /// Denominator df collapsed to zero or below, or an eigenvalue was
    /// missing; power cannot be computed.
    DegenerateDf = 15,
    /// Confidence limits were requested but the point power is itself
    /// missing; the solver was skipped.
    PowerMissingForCl = 16,
}

impl WarningCode {
    /// Numeric warning code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// One record of which numeric approximation path executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    /// The F-probability method that ran.
    pub method: FMethod,
    /// Which computation it ran for.
    pub tag: MethodTag,
}

/// Append-only log of warnings and numeric-method records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    warnings: Vec<WarningCode>,
    methods: Vec<MethodRecord>,
}

impl Diagnostics {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a degenerate condition unconditionally.
    pub fn record_unconditional(&mut self, code: WarningCode) {
        self.warnings.push(code);
    }

    /// Record which numeric method a probability evaluation used.
    pub fn record_method(&mut self, method: FMethod, tag: MethodTag) {
        self.methods.push(MethodRecord { method, tag });
    }

    /// All recorded warnings, in order.
    pub fn warnings(&self) -> &[WarningCode] {
        &self.warnings
    }

    /// All recorded method records, in order.
    pub fn methods(&self) -> &[MethodRecord] {
        &self.methods
    }

    /// Number of times a given warning was recorded.
    pub fn warning_count(&self, code: WarningCode) -> usize {
        self.warnings.iter().filter(|&&w| w == code).count()
    }

    /// The method recorded for a given tag, if any (last record wins).
    pub fn method_for(&self, tag: MethodTag) -> Option<FMethod> {
        self.methods
            .iter()
            .rev()
            .find(|r| r.tag == tag)
            .map(|r| r.method)
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_codes_are_stable() {
        assert_eq!(WarningCode::DegenerateDf.code(), 15);
        assert_eq!(WarningCode::PowerMissingForCl.code(), 16);
    }

    #[test]
    fn records_accumulate_in_order() {
        let mut diag = Diagnostics::new();
        assert!(diag.is_empty());

        diag.record_unconditional(WarningCode::DegenerateDf);
        diag.record_method(FMethod::NoncentralSeries, MethodTag::HotellingLawley);
        diag.record_method(FMethod::NormalApprox, MethodTag::ConfidenceLower);

        assert_eq!(diag.warning_count(WarningCode::DegenerateDf), 1);
        assert_eq!(diag.warning_count(WarningCode::PowerMissingForCl), 0);
        assert_eq!(
            diag.method_for(MethodTag::HotellingLawley),
            Some(FMethod::NoncentralSeries)
        );
        assert_eq!(
            diag.method_for(MethodTag::ConfidenceLower),
            Some(FMethod::NormalApprox)
        );
        assert_eq!(diag.method_for(MethodTag::ConfidenceUpper), None);
    }

    #[test]
    fn last_record_wins_per_tag() {
        let mut diag = Diagnostics::new();
        diag.record_method(FMethod::NoncentralSeries, MethodTag::WilksLambda);
        diag.record_method(FMethod::MomentMatched, MethodTag::WilksLambda);
        assert_eq!(
            diag.method_for(MethodTag::WilksLambda),
            Some(FMethod::MomentMatched)
        );
        assert_eq!(diag.methods().len(), 2);
    }
}
