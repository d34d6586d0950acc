use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::{IntervalSetError, IntervalSetResult};
use crate::models::GenomicInterval;
use crate::track::TrackRow;
use crate::utils::get_dynamic_reader;

///
/// IntervalSet struct, an ordered collection of intervals that all belong
/// to one genome assembly (for example `hg38`).
///
/// An interval set is built once and then only read, so it can be shared
/// between threads by reference.
///
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalSet {
    intervals: Vec<GenomicInterval>,
    assembly: String,
    path: Option<PathBuf>,
}

impl IntervalSet {
    pub fn new<S: Into<String>>(assembly: S, intervals: Vec<GenomicInterval>) -> Self {
        IntervalSet {
            intervals,
            assembly: assembly.into(),
            path: None,
        }
    }

    ///
    /// Read a bed file (optionally gzipped) into an [IntervalSet].
    ///
    /// Only the first three columns are kept. `browser`, `track` and `#`
    /// lines are skipped, as is a column header on the first line.
    ///
    /// # Arguments:
    /// - path: path to bed file on disk
    /// - assembly: genome assembly the coordinates refer to
    pub fn from_bed<P: AsRef<Path>, S: Into<String>>(
        path: P,
        assembly: S,
    ) -> IntervalSetResult<Self> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)
            .map_err(|e| IntervalSetError::FileReadError(format!("{}: {}", path.display(), e)))?;

        let mut intervals: Vec<GenomicInterval> = Vec::new();
        let mut first_line = true;

        for line in reader.lines() {
            let line = line?;

            if line.trim().is_empty()
                || line.starts_with("browser")
                || line.starts_with("track")
                || line.starts_with('#')
            {
                first_line = false;
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();

            // handle column headers like `chr start end` without a leading #
            if first_line {
                first_line = false;
                if parts.len() >= 3 && parts[1].parse::<u32>().is_err() {
                    continue;
                }
            }

            if parts.len() < 3 {
                return Err(IntervalSetError::IntervalParseError(line.clone()));
            }

            let start = parts[1]
                .trim()
                .parse::<u32>()
                .map_err(|_| IntervalSetError::IntervalParseError(line.clone()))?;
            let end = parts[2]
                .trim()
                .parse::<u32>()
                .map_err(|_| IntervalSetError::IntervalParseError(line.clone()))?;

            intervals.push(GenomicInterval::new(parts[0], start, end)?);
        }

        if intervals.is_empty() {
            return Err(IntervalSetError::EmptyIntervalSet(path.display().to_string()));
        }

        Ok(IntervalSet {
            intervals,
            assembly: assembly.into(),
            path: Some(path.to_owned()),
        })
    }

    ///
    /// Build an [IntervalSet] from rows returned by a genome track source.
    ///
    pub fn from_track_rows<S: Into<String>>(
        assembly: S,
        rows: Vec<TrackRow>,
    ) -> IntervalSetResult<Self> {
        let intervals = rows
            .into_iter()
            .map(|row| GenomicInterval::new(row.chrom, row.start, row.end))
            .collect::<IntervalSetResult<Vec<_>>>()?;

        Ok(IntervalSet::new(assembly, intervals))
    }

    pub fn intervals(&self) -> &[GenomicInterval] {
        &self.intervals
    }

    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    ///
    /// Total number of bases covered, summed interval by interval
    /// (overlapping intervals are counted twice).
    ///
    pub fn total_length(&self) -> u64 {
        self.intervals.iter().map(|iv| iv.width() as u64).sum()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a GenomicInterval;
    type IntoIter = std::slice::Iter<'a, GenomicInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

impl Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IntervalSet with {} intervals ({}).",
            self.len(),
            self.assembly
        )
    }
}
