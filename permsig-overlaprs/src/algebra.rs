use permsig_core::models::{GenomicInterval, IntervalSet};
use permsig_core::traits::IntervalAlgebra;

use crate::GenomeIndex;

///
/// [IntervalAlgebra] backed by a [GenomeIndex] built over `b` on each call.
///
/// Callers that intersect many sets against the same reference should build a
/// [GenomeIndex] once and query it directly instead.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct AIListAlgebra;

impl IntervalAlgebra for AIListAlgebra {
    fn intersect(
        &self,
        a: &IntervalSet,
        b: &IntervalSet,
        min_fraction: f64,
        unique: bool,
    ) -> IntervalSet {
        let index = GenomeIndex::from(b);

        let intervals: Vec<GenomicInterval> = a
            .into_iter()
            .flat_map(|iv| {
                let copies = match unique {
                    true => usize::from(index.covers(iv, min_fraction)),
                    false => index.qualifying_hits(iv, min_fraction),
                };
                std::iter::repeat_n(iv.clone(), copies)
            })
            .collect();

        IntervalSet::new(a.assembly(), intervals)
    }
}
