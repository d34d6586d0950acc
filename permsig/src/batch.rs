use log::info;

use permsig_core::models::{ChromSizes, IntervalSet};

use crate::errors::PermTestResult;
use crate::overlap::{OverlapEvaluator, checked_total_length};
use crate::posterior::PosteriorEstimate;
use crate::runner::PermutationTest;

///
/// Runs one [PermutationTest] per named feature set against a single
/// reference.
///
/// The reference is indexed once and shared by every feature. Results keep
/// the input order. The first failing feature aborts the batch and its
/// error is returned; no partial results are kept.
///
pub struct OverlapBatchRunner {
    test: PermutationTest,
}

impl OverlapBatchRunner {
    pub fn new(test: PermutationTest) -> Self {
        OverlapBatchRunner { test }
    }

    pub fn test(&self) -> &PermutationTest {
        &self.test
    }

    pub fn run(
        &self,
        chrom_sizes: &ChromSizes,
        reference: &IntervalSet,
        named_features: &[(String, IntervalSet)],
    ) -> PermTestResult<Vec<(String, PosteriorEstimate)>> {
        if named_features.is_empty() {
            return Ok(Vec::new());
        }

        for (_, feature) in named_features {
            checked_total_length(feature)?;
        }

        info!(
            "Testing {} feature sets against {} reference intervals",
            named_features.len(),
            reference.len()
        );
        let evaluator = OverlapEvaluator::new(reference);

        named_features
            .iter()
            .map(|(name, feature)| {
                info!("Feature set {}", name);
                let estimate = self.test.compute_with(chrom_sizes, &evaluator, feature)?;
                Ok((name.clone(), estimate))
            })
            .collect()
    }
}
