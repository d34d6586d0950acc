use std::path::{Path, PathBuf};

use crate::errors::{IntervalSetError, IntervalSetResult};
use crate::models::{ChromSizes, IntervalSet};

/// Interval set primitives the significance engine builds on.
pub trait IntervalAlgebra: Send + Sync {
    ///
    /// Load an interval set from disk.
    ///
    fn load(&self, path: &Path, assembly: &str) -> IntervalSetResult<IntervalSet> {
        IntervalSet::from_bed(path, assembly)
    }

    ///
    /// Intervals of `a` that have at least `min_fraction` of their width
    /// covered by a single interval of `b`.
    ///
    /// With `unique` each interval of `a` is reported once; otherwise it is
    /// reported once per qualifying interval of `b`.
    fn intersect(
        &self,
        a: &IntervalSet,
        b: &IntervalSet,
        min_fraction: f64,
        unique: bool,
    ) -> IntervalSet;

    fn total_length(&self, set: &IntervalSet) -> u64 {
        set.total_length()
    }
}

/// Resolves an assembly name into its chromosome sizes.
pub trait ChromSizeProvider {
    fn chrom_sizes(&self, assembly: &str) -> IntervalSetResult<ChromSizes>;
}

/// A fixed table answers for any assembly.
impl ChromSizeProvider for ChromSizes {
    fn chrom_sizes(&self, _assembly: &str) -> IntervalSetResult<ChromSizes> {
        Ok(self.clone())
    }
}

///
/// Looks up `<dir>/<assembly>.chrom.sizes`.
///
#[derive(Clone, Debug)]
pub struct ChromSizesDir {
    dir: PathBuf,
}

impl ChromSizesDir {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        ChromSizesDir { dir: dir.into() }
    }
}

impl ChromSizeProvider for ChromSizesDir {
    fn chrom_sizes(&self, assembly: &str) -> IntervalSetResult<ChromSizes> {
        let path = self.dir.join(format!("{}.chrom.sizes", assembly));
        if !path.is_file() {
            return Err(IntervalSetError::UnknownAssembly(assembly.to_string()));
        }
        ChromSizes::try_from(path.as_path())
    }
}
