//! Genome-wide interval index for multi-chromosome overlap queries.
//!
//! [`GenomeIndex`] keeps one [`AIList`] per chromosome. It is built once from
//! a reference [`IntervalSet`] and then only queried, so a single index can be
//! shared by every worker of a permutation run.
//!
//! # Examples
//!
//! ```
//! use permsig_overlaprs::GenomeIndex;
//! use permsig_core::models::{GenomicInterval, IntervalSet};
//!
//! let genes = IntervalSet::new("hg38", vec![
//!     GenomicInterval::new("chr1", 1000, 2000).unwrap(),
//!     GenomicInterval::new("chr2", 1000, 3000).unwrap(),
//! ]);
//! let index = GenomeIndex::from(&genes);
//!
//! let query = GenomicInterval::new("chr1", 1500, 2500).unwrap();
//! assert_eq!(index.max_overlap(&query), 500);
//! assert!(index.covers(&query, 0.5));
//! assert!(!index.covers(&query, 0.6));
//! ```

use std::collections::HashMap;

use permsig_core::models::{GenomicInterval, Interval, IntervalSet};

use crate::AIList;

/// One [`AIList`] per chromosome. Stored payloads are positions in the
/// reference set the index was built from.
#[derive(Debug, Clone)]
pub struct GenomeIndex {
    index_maps: HashMap<String, AIList<u32, usize>>,
}

impl From<&IntervalSet> for GenomeIndex {
    fn from(set: &IntervalSet) -> Self {
        let mut intervals: HashMap<String, Vec<Interval<u32, usize>>> = HashMap::new();

        for (idx, iv) in set.intervals().iter().enumerate() {
            intervals
                .entry(iv.chr().to_string())
                .or_default()
                .push(Interval {
                    start: iv.start(),
                    end: iv.end(),
                    val: idx,
                });
        }

        let index_maps = intervals
            .into_iter()
            .map(|(chr, ivs)| (chr, AIList::build(ivs)))
            .collect();

        GenomeIndex { index_maps }
    }
}

impl GenomeIndex {
    /// Indexed intervals overlapping `iv`, on its chromosome.
    pub fn find_iter<'a>(
        &'a self,
        iv: &GenomicInterval,
    ) -> impl Iterator<Item = &'a Interval<u32, usize>> + 'a {
        let (start, end) = (iv.start(), iv.end());
        self.index_maps
            .get(iv.chr())
            .into_iter()
            .flat_map(move |list| list.find_iter(start, end))
    }

    /// Bases of `iv` covered by its best single overlapping interval.
    pub fn max_overlap(&self, iv: &GenomicInterval) -> u32 {
        self.index_maps
            .get(iv.chr())
            .map_or(0, |list| list.max_overlap(iv.start(), iv.end()))
    }

    /// Whether a single indexed interval covers at least `min_fraction` of `iv`.
    pub fn covers(&self, iv: &GenomicInterval, min_fraction: f64) -> bool {
        let overlap = self.max_overlap(iv);
        overlap > 0 && meets_fraction(overlap, iv.width(), min_fraction)
    }

    /// Number of indexed intervals that each cover at least `min_fraction` of `iv`.
    pub fn qualifying_hits(&self, iv: &GenomicInterval, min_fraction: f64) -> usize {
        self.find_iter(iv)
            .map(|hit| hit.overlap_len(iv.start(), iv.end()))
            .filter(|&overlap| overlap > 0 && meets_fraction(overlap, iv.width(), min_fraction))
            .count()
    }

    ///
    /// Summed width of the intervals of `query` that are covered to at least
    /// `min_fraction` by a single indexed interval.
    ///
    pub fn covered_length(&self, query: &IntervalSet, min_fraction: f64) -> u64 {
        query
            .into_iter()
            .filter(|iv| self.covers(iv, min_fraction))
            .map(|iv| iv.width() as u64)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.index_maps.values().map(|list| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[inline]
fn meets_fraction(overlap: u32, width: u32, min_fraction: f64) -> bool {
    overlap as f64 / width as f64 >= min_fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn iv(chr: &str, start: u32, end: u32) -> GenomicInterval {
        GenomicInterval::new(chr, start, end).unwrap()
    }

    #[fixture]
    fn reference() -> IntervalSet {
        IntervalSet::new(
            "hg38",
            vec![
                iv("chr1", 100, 200),
                iv("chr1", 150, 300),
                iv("chr2", 0, 50),
            ],
        )
    }

    #[rstest]
    fn test_index_len(reference: IntervalSet) {
        let index = GenomeIndex::from(&reference);
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }

    #[rstest]
    fn test_max_overlap_uses_single_interval(reference: IntervalSet) {
        let index = GenomeIndex::from(&reference);
        // [120, 320) is covered by the union for 180 bases but by one interval for 150 at most
        assert_eq!(index.max_overlap(&iv("chr1", 120, 320)), 150);
        assert_eq!(index.max_overlap(&iv("chr3", 120, 320)), 0);
    }

    #[rstest]
    #[case(iv("chr1", 250, 350), 1.0, false)]
    #[case(iv("chr1", 250, 350), 0.5, true)]
    #[case(iv("chr2", 40, 60), 0.5, true)]
    #[case(iv("chr2", 40, 60), 0.6, false)]
    #[case(iv("chr2", 50, 60), 1e-9, false)]
    #[case(iv("chr2", 43, 143), 0.07, true)]
    #[case(iv("chr2", 44, 144), 0.07, false)]
    fn test_covers(
        reference: IntervalSet,
        #[case] query: GenomicInterval,
        #[case] min_fraction: f64,
        #[case] expected: bool,
    ) {
        let index = GenomeIndex::from(&reference);
        assert_eq!(index.covers(&query, min_fraction), expected);
    }

    #[rstest]
    fn test_qualifying_hits(reference: IntervalSet) {
        let index = GenomeIndex::from(&reference);
        assert_eq!(index.qualifying_hits(&iv("chr1", 160, 190), 1.0), 2);
        assert_eq!(index.qualifying_hits(&iv("chr1", 160, 250), 1.0), 1);
    }

    #[rstest]
    fn test_covered_length(reference: IntervalSet) {
        let index = GenomeIndex::from(&reference);
        let query = IntervalSet::new(
            "hg38",
            vec![iv("chr1", 100, 150), iv("chr1", 290, 400), iv("chr2", 10, 20)],
        );
        assert_eq!(index.covered_length(&query, 1.0), 60);
        assert_eq!(index.covered_length(&query, 1e-9), 170);
    }
}
