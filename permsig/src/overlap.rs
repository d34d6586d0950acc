//! Length-weighted overlap between a feature set and a reference set.

use permsig_core::models::IntervalSet;
use permsig_overlaprs::GenomeIndex;

use crate::config::validate_fraction;
use crate::errors::{PermTestError, PermTestResult};

///
/// Measures how much of a feature set lands on a fixed reference.
///
/// The reference is indexed once on construction; the evaluator is then
/// read-only and can be shared by all permutation workers.
///
#[derive(Debug, Clone)]
pub struct OverlapEvaluator {
    index: GenomeIndex,
    assembly: String,
}

impl OverlapEvaluator {
    pub fn new(reference: &IntervalSet) -> Self {
        OverlapEvaluator {
            index: GenomeIndex::from(reference),
            assembly: reference.assembly().to_string(),
        }
    }

    /// Assembly of the indexed reference.
    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    ///
    /// Fraction of the feature's total width that sits in intervals having
    /// at least `min_fraction` of their own width covered by one reference
    /// interval.
    ///
    pub fn ratio(&self, feature: &IntervalSet, min_fraction: f64) -> PermTestResult<f64> {
        validate_fraction(min_fraction)?;
        let total = checked_total_length(feature)?;

        let covered = self.index.covered_length(feature, min_fraction);
        Ok(covered as f64 / total as f64)
    }
}

///
/// One-off version of [OverlapEvaluator::ratio].
///
pub fn overlap_ratio(
    feature: &IntervalSet,
    reference: &IntervalSet,
    min_fraction: f64,
) -> PermTestResult<f64> {
    validate_fraction(min_fraction)?;
    checked_total_length(feature)?;
    OverlapEvaluator::new(reference).ratio(feature, min_fraction)
}

/// Total feature width, or [PermTestError::EmptyFeatureSet] when it is zero.
pub(crate) fn checked_total_length(feature: &IntervalSet) -> PermTestResult<u64> {
    match feature.total_length() {
        0 => Err(PermTestError::EmptyFeatureSet),
        total => Ok(total),
    }
}
