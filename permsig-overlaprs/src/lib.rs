//! Interval overlap structures for permsig.
//!
//! [`AIList`] answers overlap queries on a single chromosome, [`GenomeIndex`]
//! combines one list per chromosome, and [`AIListAlgebra`] exposes both through
//! the [`IntervalAlgebra`](permsig_core::traits::IntervalAlgebra) trait.
//!
//! All structures are `Send + Sync` and immutable after construction.
//!
//! ```rust
//! use permsig_overlaprs::AIList;
//! use permsig_core::models::Interval;
//!
//! let peaks = vec![
//!     Interval { start: 100u32, end: 200, val: "peak1" },
//!     Interval { start: 150, end: 300, val: "peak2" },
//!     Interval { start: 400, end: 500, val: "peak3" },
//! ];
//!
//! let ailist = AIList::build(peaks);
//! assert_eq!(ailist.find(180, 250).len(), 2);
//! ```

/// Augmented Interval List implementation.
pub mod ailist;

/// Default interval algebra.
pub mod algebra;

/// Genome-wide interval indexing.
pub mod genome_index;

// re-exports
pub use self::ailist::AIList;
pub use self::algebra::AIListAlgebra;
pub use self::genome_index::GenomeIndex;
