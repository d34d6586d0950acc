//! Core data model for permsig.
//!
//! This crate holds the types every other permsig crate passes around:
//! [GenomicInterval](models::GenomicInterval), [IntervalSet](models::IntervalSet)
//! and [ChromSizes](models::ChromSizes), plus the traits through which the
//! significance engine talks to its collaborators (interval algebra, chromosome
//! size lookup and remote track sources).
//!
//! # Example
//!
//! ```no_run
//! use permsig_core::models::{ChromSizes, IntervalSet};
//! use std::path::Path;
//!
//! let peaks = IntervalSet::from_bed("peaks.bed.gz", "hg38").unwrap();
//! let sizes = ChromSizes::try_from(Path::new("hg38.chrom.sizes")).unwrap();
//!
//! println!("{} ({} bases)", peaks, peaks.total_length());
//! ```

pub mod errors;
pub mod models;
pub mod track;
pub mod traits;
pub mod utils;

pub use errors::{IntervalSetError, IntervalSetResult};
