//! # permsig
//!
//! Permutation-based significance of the overlap between a set of genomic
//! features and a reference annotation.
//!
//! The observed overlap ratio of a feature set is the share of its total
//! width lying in intervals that are sufficiently covered by the reference.
//! Shuffling the feature set along its chromosomes many times gives a null
//! distribution of that ratio, and a Bayesian update of prior odds turns the
//! comparison into a posterior probability for enrichment.
//!
//! Permutations run concurrently on a rayon pool. A run can be observed
//! trial by trial with a [TrialObserver] and stopped with a
//! [CancellationToken].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use permsig::compute_posterior;
//! use permsig_core::models::{ChromSizes, IntervalSet};
//!
//! # fn main() -> anyhow::Result<()> {
//! let chrom_sizes = ChromSizes::try_from(Path::new("hg38.chrom.sizes"))?;
//! let genes = IntervalSet::from_bed("knownGene.bed", "hg38")?;
//! let peaks = IntervalSet::from_bed("peaks.bed.gz", "hg38")?;
//!
//! let estimate = compute_posterior(&chrom_sizes, &genes, &peaks, 0.5, 1000, 0.5, 0.5)?;
//! println!("posterior: {}", estimate.posterior_probability());
//! # Ok(())
//! # }
//! ```
pub mod batch;
pub mod config;
pub mod engine;
pub mod errors;
pub mod observer;
pub mod overlap;
pub mod posterior;
pub mod runner;
pub mod shuffle;

pub use batch::OverlapBatchRunner;
pub use config::{ConfigError, PermTestConfig};
pub use engine::{CancellationToken, PermutationEngine};
pub use errors::{PermTestError, PermTestResult};
pub use observer::{LoggingObserver, NoopObserver, TrialObserver, TrialReport};
pub use overlap::{OverlapEvaluator, overlap_ratio};
pub use posterior::{PosteriorEstimate, estimate};
pub use runner::PermutationTest;
pub use shuffle::shuffle;

use permsig_core::models::{ChromSizes, IntervalSet};

fn one_off_config(
    min_overlap_fraction: f64,
    num_permutations: usize,
    prior_null: f64,
    prior_alt: f64,
) -> PermTestConfig {
    PermTestConfig {
        min_overlap_fraction,
        num_permutations,
        prior_null,
        prior_alt,
        ..Default::default()
    }
}

///
/// Posterior probability that `feature` is enriched on `reference`.
///
/// # Arguments
/// - chrom_sizes: chromosome lengths bounding the shuffle
/// - reference: annotation the overlap is measured against
/// - feature: the set being tested
/// - min_overlap_fraction: minimum covered fraction of a feature interval, in (0, 1]
/// - num_permutations: number of shuffles
/// - prior_null: prior weight of no enrichment
/// - prior_alt: prior weight of enrichment
pub fn compute_posterior(
    chrom_sizes: &ChromSizes,
    reference: &IntervalSet,
    feature: &IntervalSet,
    min_overlap_fraction: f64,
    num_permutations: usize,
    prior_null: f64,
    prior_alt: f64,
) -> PermTestResult<PosteriorEstimate> {
    let config = one_off_config(min_overlap_fraction, num_permutations, prior_null, prior_alt);
    PermutationTest::new(config)?.compute(chrom_sizes, reference, feature)
}

///
/// [compute_posterior] for every named feature set, in input order.
///
/// Every feature set is checked before any permutation runs, and the first
/// failure aborts the whole batch.
pub fn batch_compute(
    chrom_sizes: &ChromSizes,
    reference: &IntervalSet,
    named_features: &[(String, IntervalSet)],
    min_overlap_fraction: f64,
    num_permutations: usize,
    prior_null: f64,
    prior_alt: f64,
) -> PermTestResult<Vec<(String, PosteriorEstimate)>> {
    let config = one_off_config(min_overlap_fraction, num_permutations, prior_null, prior_alt);
    OverlapBatchRunner::new(PermutationTest::new(config)?).run(chrom_sizes, reference, named_features)
}
