use std::fmt::{self, Display};

use crate::errors::{IntervalSetError, IntervalSetResult};

///
/// A single genomic interval `[start, end)` on one chromosome.
///
/// Fields are private so an interval cannot change after construction;
/// `end >= start` is checked by [GenomicInterval::new].
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenomicInterval {
    chr: String,
    start: u32,
    end: u32,
}

impl GenomicInterval {
    pub fn new<S: Into<String>>(chr: S, start: u32, end: u32) -> IntervalSetResult<Self> {
        let chr = chr.into();
        if end < start {
            return Err(IntervalSetError::InvalidInterval { chr, start, end });
        }
        Ok(GenomicInterval { chr, start, end })
    }

    pub fn chr(&self) -> &str {
        &self.chr
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    ///
    /// Number of bases covered by the interval
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    ///
    /// Same chromosome and width, placed at `start`
    ///
    pub fn moved_to(&self, start: u32) -> Self {
        GenomicInterval {
            chr: self.chr.clone(),
            start,
            end: start + self.width(),
        }
    }
}

impl Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)
    }
}
