use log::{info, warn};

use permsig_core::models::{ChromSizes, IntervalSet};

use crate::config::PermTestConfig;
use crate::engine::{CancellationToken, PermutationEngine};
use crate::errors::PermTestResult;
use crate::observer::TrialObserver;
use crate::overlap::{OverlapEvaluator, checked_total_length};
use crate::posterior::{PosteriorEstimate, estimate};

///
/// A reusable permutation test: one config, one worker pool.
///
/// ```no_run
/// # use std::path::Path;
/// # use permsig::{PermTestConfig, PermutationTest};
/// # use permsig_core::models::{ChromSizes, IntervalSet};
/// # fn main() -> anyhow::Result<()> {
/// let chrom_sizes = ChromSizes::try_from(Path::new("hg38.chrom.sizes"))?;
/// let reference = IntervalSet::from_bed(Path::new("knownGene.bed"), "hg38")?;
/// let feature = IntervalSet::from_bed(Path::new("peaks.bed"), "hg38")?;
///
/// let config = PermTestConfig {
///     num_permutations: 500,
///     seed: Some(42),
///     ..Default::default()
/// };
/// let estimate = PermutationTest::new(config)?.compute(&chrom_sizes, &reference, &feature)?;
/// println!("{}", estimate);
/// # Ok(())
/// # }
/// ```
pub struct PermutationTest {
    config: PermTestConfig,
    engine: PermutationEngine,
}

impl PermutationTest {
    /// Validate `config` and spin up its worker pool.
    pub fn new(config: PermTestConfig) -> PermTestResult<Self> {
        config.validate()?;
        let engine = PermutationEngine::new(config.threads)?.with_seed(config.seed);
        Ok(PermutationTest { config, engine })
    }

    pub fn with_observer<O: TrialObserver + 'static>(mut self, observer: O) -> Self {
        self.engine = self.engine.with_observer(observer);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.engine = self.engine.with_cancellation(token);
        self
    }

    pub fn config(&self) -> &PermTestConfig {
        &self.config
    }

    pub fn engine(&self) -> &PermutationEngine {
        &self.engine
    }

    ///
    /// Measure the observed overlap of `feature` on `reference`, build the
    /// null distribution by shuffling `feature`, and return the posterior.
    ///
    pub fn compute(
        &self,
        chrom_sizes: &ChromSizes,
        reference: &IntervalSet,
        feature: &IntervalSet,
    ) -> PermTestResult<PosteriorEstimate> {
        checked_total_length(feature)?;
        let evaluator = OverlapEvaluator::new(reference);
        self.compute_with(chrom_sizes, &evaluator, feature)
    }

    pub(crate) fn compute_with(
        &self,
        chrom_sizes: &ChromSizes,
        evaluator: &OverlapEvaluator,
        feature: &IntervalSet,
    ) -> PermTestResult<PosteriorEstimate> {
        if evaluator.assembly() != feature.assembly() {
            warn!(
                "Feature assembly {} differs from reference assembly {}",
                feature.assembly(),
                evaluator.assembly()
            );
        }

        let observed = evaluator.ratio(feature, self.config.min_overlap_fraction)?;
        let permuted = self.engine.run_with_evaluator(
            self.config.num_permutations,
            feature,
            evaluator,
            self.config.min_overlap_fraction,
            chrom_sizes,
        )?;

        let estimate = estimate(
            observed,
            &permuted,
            self.config.prior_null,
            self.config.prior_alt,
        )?;
        info!("{}", estimate);

        Ok(estimate)
    }
}
