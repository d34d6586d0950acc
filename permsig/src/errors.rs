use thiserror::Error;

use permsig_core::IntervalSetError;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum PermTestError {
    #[error("Feature set has zero total length")]
    EmptyFeatureSet,
    #[error("Minimum overlap fraction must be in (0, 1], got {0}")]
    InvalidFraction(f64),
    #[error("Number of permutations must be greater than 0, got {0}")]
    InvalidPermutationCount(usize),
    #[error("Priors must be finite and greater than 0, got null={prior_null}, alt={prior_alt}")]
    InvalidPriors { prior_null: f64, prior_alt: f64 },
    #[error("Observed overlap ratio must be in [0, 1], got {0}")]
    InvalidObservedRatio(f64),
    #[error("Interval of width {width} does not fit on {chr} (length {chrom_length})")]
    ChromosomeTooShort {
        chr: String,
        width: u32,
        chrom_length: u32,
    },
    #[error("Chromosome {0} is missing from the chromosome sizes")]
    UnknownChromosome(String),
    #[error("Permutation worker failed: {0}")]
    WorkerFailure(String),
    #[error("Permutation run was cancelled")]
    Cancelled,
    #[error(transparent)]
    IntervalSet(#[from] IntervalSetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type PermTestResult<T> = std::result::Result<T, PermTestError>;
