use std::mem::swap;

use num_traits::{PrimInt, Unsigned};

use permsig_core::models::Interval;

/// Intervals that cover more than this many of their successors are pushed
/// into the next sublist during decomposition.
const MIN_COVERAGE_LENGTH: usize = 10;

/// An Augmented Interval List for overlap queries on one chromosome.
///
/// From the following article: <https://academic.oup.com/bioinformatics/article/35/23/4907/5509521>
///
/// The list is split into sublists so that long intervals covering many
/// others do not degrade queries. Each sublist is sorted by start and carries
/// a running maximum of ends, which lets a query stop scanning early.
///
/// # Examples
///
/// ```
/// use permsig_overlaprs::AIList;
/// use permsig_core::models::Interval;
///
/// let genes = vec![
///     Interval { start: 1000u32, end: 2000, val: "GENE1" },
///     Interval { start: 1500, end: 2500, val: "GENE2" },
///     Interval { start: 5000, end: 6000, val: "GENE3" },
/// ];
///
/// let ailist = AIList::build(genes);
/// assert_eq!(ailist.find_iter(1800, 2200).count(), 2);
/// assert_eq!(ailist.max_overlap(1800, 2200), 400);
/// ```
#[derive(Debug, Clone)]
pub struct AIList<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    starts: Vec<I>,
    ends: Vec<I>,
    max_ends: Vec<I>,
    header_list: Vec<usize>,
    stored_intervals: Vec<Interval<I, T>>,
}

/// Scratch space reused by every round of [`AIList::decompose`].
#[derive(Debug)]
struct Decomposition<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    starts: Vec<I>,
    ends: Vec<I>,
    max_ends: Vec<I>,
    stored_intervals: Vec<Interval<I, T>>,
    /// intervals left over for the next sublist
    rest: Vec<Interval<I, T>>,
}

impl<I, T> Decomposition<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn with_capacity(cap: usize) -> Self {
        Self {
            starts: Vec::with_capacity(cap),
            ends: Vec::with_capacity(cap),
            max_ends: Vec::with_capacity(cap),
            stored_intervals: Vec::with_capacity(cap),
            rest: Vec::with_capacity(cap),
        }
    }

    fn clear(&mut self) {
        self.starts.clear();
        self.ends.clear();
        self.max_ends.clear();
        self.stored_intervals.clear();
        self.rest.clear();
    }
}

impl<I, T> AIList<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    ///
    /// Build the list. Intervals do not need to be sorted.
    ///
    pub fn build(mut intervals: Vec<Interval<I, T>>) -> Self {
        intervals.sort_by_key(|iv| iv.start);

        let mut starts = Vec::with_capacity(intervals.len());
        let mut ends = Vec::with_capacity(intervals.len());
        let mut max_ends = Vec::with_capacity(intervals.len());
        let mut stored_intervals = Vec::with_capacity(intervals.len());

        let mut scratch = Decomposition::with_capacity(intervals.len());
        let mut header_list = vec![0];

        loop {
            Self::decompose(&intervals, &mut scratch);

            starts.append(&mut scratch.starts);
            ends.append(&mut scratch.ends);
            max_ends.append(&mut scratch.max_ends);
            stored_intervals.append(&mut scratch.stored_intervals);
            swap(&mut intervals, &mut scratch.rest);

            if intervals.is_empty() {
                break;
            }
            header_list.push(starts.len());
        }

        AIList {
            starts,
            ends,
            max_ends,
            header_list,
            stored_intervals,
        }
    }

    fn decompose(intervals: &[Interval<I, T>], scratch: &mut Decomposition<I, T>) {
        scratch.clear();

        for (index, interval) in intervals.iter().enumerate() {
            let covered = intervals[index + 1..]
                .iter()
                .take(MIN_COVERAGE_LENGTH * 2 - 1)
                .filter(|next| interval.end > next.end)
                .count();

            if covered >= MIN_COVERAGE_LENGTH {
                scratch.rest.push(interval.clone());
            } else {
                scratch.starts.push(interval.start);
                scratch.ends.push(interval.end);
                scratch.stored_intervals.push(interval.clone());
            }
        }

        let mut max = I::zero();
        for end in scratch.ends.iter() {
            max = max.max(*end);
            scratch.max_ends.push(max);
        }
    }

    fn sublist_range(&self, idx: usize) -> std::ops::Range<usize> {
        let first = self.header_list[idx];
        let last = self
            .header_list
            .get(idx + 1)
            .copied()
            .unwrap_or(self.starts.len());
        first..last
    }

    ///
    /// Iterate the stored intervals that overlap `[start, end)`.
    ///
    pub fn find_iter(&self, start: I, end: I) -> IterFind<'_, I, T> {
        IterFind {
            inner: self,
            header_list_idx: 0,
            list_idx: None,
            start,
            end,
        }
    }

    pub fn find(&self, start: I, end: I) -> Vec<Interval<I, T>> {
        self.find_iter(start, end).cloned().collect()
    }

    ///
    /// Largest number of positions of `[start, end)` covered by any single
    /// stored interval; zero when nothing overlaps.
    ///
    pub fn max_overlap(&self, start: I, end: I) -> I {
        self.find_iter(start, end)
            .map(|iv| iv.overlap_len(start, end))
            .fold(I::zero(), |best, len| best.max(len))
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

/// Lazily yields intervals of an [`AIList`] overlapping a query range.
///
/// Created by [`AIList::find_iter`].
#[derive(Debug)]
pub struct IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    inner: &'a AIList<I, T>,
    header_list_idx: usize,
    list_idx: Option<usize>,
    start: I,
    end: I,
}

impl<'a, I, T> Iterator for IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    type Item = &'a Interval<I, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.inner.is_empty() {
            return None;
        }

        while self.header_list_idx < self.inner.header_list.len() {
            let range = self.inner.sublist_range(self.header_list_idx);
            let starts = &self.inner.starts[range.clone()];
            let ends = &self.inner.ends[range.clone()];
            let max_ends = &self.inner.max_ends[range.clone()];
            let stored = &self.inner.stored_intervals[range];

            let end = self.end;
            let i = self
                .list_idx
                .get_or_insert_with(|| starts.partition_point(|&x| x < end));

            while *i > 0 {
                *i -= 1;
                // start inclusive, end exclusive
                if self.start >= ends[*i] {
                    if self.start > max_ends[*i] {
                        break;
                    }
                } else {
                    return Some(&stored[*i]);
                }
            }

            self.list_idx = None;
            self.header_list_idx += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn intervals() -> Vec<Interval<u32, &'static str>> {
        vec![
            Interval {
                start: 1,
                end: 5,
                val: "a",
            },
            Interval {
                start: 3,
                end: 7,
                val: "b",
            },
            Interval {
                start: 6,
                end: 10,
                val: "c",
            },
            Interval {
                start: 8,
                end: 12,
                val: "d",
            },
        ]
    }

    #[rstest]
    fn test_build_and_len(intervals: Vec<Interval<u32, &'static str>>) {
        let ailist = AIList::build(intervals.clone());
        assert_eq!(ailist.len(), intervals.len());
        assert!(!ailist.is_empty());
    }

    #[rstest]
    fn test_find_overlapping_intervals(intervals: Vec<Interval<u32, &'static str>>) {
        let ailist = AIList::build(intervals);

        let vals: Vec<&str> = ailist.find_iter(2, 4).map(|iv| iv.val).collect();
        assert!(vals.contains(&"a"));
        assert!(vals.contains(&"b"));
        assert_eq!(vals.len(), 2);

        let vals: Vec<&str> = ailist.find(9, 11).iter().map(|iv| iv.val).collect();
        assert!(vals.contains(&"c"));
        assert!(vals.contains(&"d"));
        assert_eq!(vals.len(), 2);
    }

    #[rstest]
    fn test_find_no_overlap(intervals: Vec<Interval<u32, &'static str>>) {
        let ailist = AIList::build(intervals);
        assert_eq!(ailist.find_iter(13, 15).count(), 0);
        assert_eq!(ailist.find_iter(0, 1).count(), 0);
    }

    #[rstest]
    fn test_empty_ailist() {
        let ailist: AIList<u32, &str> = AIList::build(vec![]);
        assert!(ailist.is_empty());
        assert_eq!(ailist.find_iter(1, 2).count(), 0);
        assert_eq!(ailist.max_overlap(1, 2), 0);
    }

    #[rstest]
    fn test_max_overlap(intervals: Vec<Interval<u32, &'static str>>) {
        let ailist = AIList::build(intervals);
        // [2, 7) shares 3 positions with a, 4 with b, 1 with c
        assert_eq!(ailist.max_overlap(2, 7), 4);
        assert_eq!(ailist.max_overlap(12, 20), 0);
    }

    #[rstest]
    fn test_decomposed_list() {
        let iv = |start: usize, end: usize| -> Interval<usize, ()> {
            Interval {
                start,
                end,
                val: (),
            }
        };
        let intervals = vec![
            iv(0, 30), // spans many intervals
            iv(0, 10),
            iv(0, 10),
            iv(5, 15),
            iv(5, 15),
            iv(10, 20),
            iv(10, 20),
            iv(15, 25),
            iv(15, 25),
            iv(21, 22),
            iv(22, 23),
            iv(20, 30),
            iv(20, 30),
            iv(25, 100), // spans many intervals
            iv(26, 27),
            iv(27, 28),
            iv(29, 30),
            iv(30, 31),
            iv(32, 33),
            iv(50, 51),
            iv(51, 52),
            iv(52, 53),
            iv(53, 54),
            iv(55, 56),
            iv(60, 61),
            iv(70, 71),
        ];

        let ailist = AIList::build(intervals);
        assert_eq!(ailist.header_list.len(), 2);

        assert_eq!(ailist.find_iter(6, 8).count(), 5);
        assert_eq!(ailist.find_iter(30, 35).count(), 3);
        assert_eq!(ailist.find_iter(101, 150).count(), 0);
        assert_eq!(ailist.max_overlap(40, 90), 50);
    }
}
