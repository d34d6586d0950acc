//! Random repositioning of intervals within their chromosome.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use permsig_core::models::{ChromSizes, GenomicInterval, IntervalSet};

use crate::errors::{PermTestError, PermTestResult};

///
/// Place every interval of `set` at a uniformly random start on its own
/// chromosome, keeping its width.
///
/// Starts are drawn from `[0, chrom_length - width]`, so the shuffled
/// interval always ends inside the chromosome. Shuffled intervals are
/// placed independently and may overlap each other.
///
/// The generator is created from `seed` on every call: the same seed gives
/// the same placement, and concurrent calls share no state.
///
/// # Arguments
/// - chrom_sizes: chromosome lengths bounding the placement
/// - set: intervals to shuffle
/// - seed: seed of this shuffle's random stream
pub fn shuffle(chrom_sizes: &ChromSizes, set: &IntervalSet, seed: u64) -> PermTestResult<IntervalSet> {
    let mut rng = StdRng::seed_from_u64(seed);

    let shuffled = set
        .into_iter()
        .map(|iv| place(chrom_sizes, iv, &mut rng))
        .collect::<PermTestResult<Vec<GenomicInterval>>>()?;

    Ok(IntervalSet::new(set.assembly(), shuffled))
}

fn place(
    chrom_sizes: &ChromSizes,
    iv: &GenomicInterval,
    rng: &mut StdRng,
) -> PermTestResult<GenomicInterval> {
    let chrom_length = chrom_sizes
        .get(iv.chr())
        .ok_or_else(|| PermTestError::UnknownChromosome(iv.chr().to_string()))?;

    let max_start = chrom_length
        .checked_sub(iv.width())
        .ok_or_else(|| PermTestError::ChromosomeTooShort {
            chr: iv.chr().to_string(),
            width: iv.width(),
            chrom_length,
        })?;

    Ok(iv.moved_to(rng.random_range(0..=max_start)))
}
