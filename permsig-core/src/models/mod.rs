pub mod chrom_sizes;
pub mod genomic_interval;
pub mod interval;
pub mod interval_set;

// re-export for cleaner imports
pub use self::chrom_sizes::ChromSizes;
pub use self::genomic_interval::GenomicInterval;
pub use self::interval::Interval;
pub use self::interval_set::IntervalSet;
