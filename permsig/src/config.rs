use std::ffi::OsStr;
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{PermTestError, PermTestResult};

/// bedtools' default `-f`: any single shared base counts.
pub const DEFAULT_MIN_OVERLAP_FRACTION: f64 = 1e-9;
pub const DEFAULT_NUM_PERMUTATIONS: usize = 1000;
pub const DEFAULT_PRIOR: f64 = 0.5;

fn default_min_overlap_fraction() -> f64 {
    DEFAULT_MIN_OVERLAP_FRACTION
}

fn default_num_permutations() -> usize {
    DEFAULT_NUM_PERMUTATIONS
}

fn default_prior() -> f64 {
    DEFAULT_PRIOR
}

///
/// Parameters of a permutation test run.
///
/// Usually read from a toml file:
///
/// ```toml
/// min_overlap_fraction = 0.5
/// num_permutations = 500
/// prior_null = 0.9
/// prior_alt = 0.1
/// seed = 42
/// threads = 8
/// ```
///
/// Missing keys fall back to their defaults.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PermTestConfig {
    #[serde(default = "default_min_overlap_fraction")]
    pub min_overlap_fraction: f64,
    #[serde(default = "default_num_permutations")]
    pub num_permutations: usize,
    #[serde(default = "default_prior")]
    pub prior_null: f64,
    #[serde(default = "default_prior")]
    pub prior_alt: f64,
    /// Base seed; trial `i` uses `seed + i`. Drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Worker threads; the number of available cores when absent.
    pub threads: Option<usize>,
}

impl Default for PermTestConfig {
    fn default() -> Self {
        PermTestConfig {
            min_overlap_fraction: DEFAULT_MIN_OVERLAP_FRACTION,
            num_permutations: DEFAULT_NUM_PERMUTATIONS,
            prior_null: DEFAULT_PRIOR,
            prior_alt: DEFAULT_PRIOR,
            seed: None,
            threads: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing or invalid file extension in config file. It must be `toml`")]
    InvalidFileType,
    #[error("Thread count must be greater than 0")]
    InvalidThreadCount,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl PermTestConfig {
    ///
    /// Check every parameter before any work is scheduled.
    ///
    pub fn validate(&self) -> PermTestResult<()> {
        validate_fraction(self.min_overlap_fraction)?;
        validate_permutation_count(self.num_permutations)?;
        validate_priors(self.prior_null, self.prior_alt)?;
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidThreadCount.into());
        }
        Ok(())
    }
}

impl TryFrom<&Path> for PermTestConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        if path.extension().and_then(OsStr::to_str) != Some("toml") {
            return Err(ConfigError::InvalidFileType);
        }
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

pub(crate) fn validate_fraction(min_fraction: f64) -> PermTestResult<()> {
    // NaN fails both comparisons
    if min_fraction > 0.0 && min_fraction <= 1.0 {
        Ok(())
    } else {
        Err(PermTestError::InvalidFraction(min_fraction))
    }
}

pub(crate) fn validate_permutation_count(num_permutations: usize) -> PermTestResult<()> {
    match num_permutations {
        0 => Err(PermTestError::InvalidPermutationCount(num_permutations)),
        _ => Ok(()),
    }
}

pub(crate) fn validate_priors(prior_null: f64, prior_alt: f64) -> PermTestResult<()> {
    let valid = |p: f64| p.is_finite() && p > 0.0;
    if valid(prior_null) && valid(prior_alt) {
        Ok(())
    } else {
        Err(PermTestError::InvalidPriors {
            prior_null,
            prior_alt,
        })
    }
}
