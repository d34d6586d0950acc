//! Interval rows coming from a genome browser table.
//!
//! permsig never talks to the network itself. A [GenomeTrackSource] is
//! handed in by the caller and only needs to turn a [TrackQuery] into rows.

use crate::errors::{IntervalSetError, IntervalSetResult};
use crate::models::IntervalSet;

/// One track window request. The assembly, chromosome and window are always
/// passed explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackQuery {
    pub track: String,
    pub assembly: String,
    pub chrom: String,
    pub start: u32,
    pub end: u32,
}

/// A raw interval row as returned by a track source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackRow {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
}

/// Positions of the chromosome, start and end fields in a primary table row.
///
/// Tables differ: `knownGene` rows are `name chrom strand txStart txEnd ...`
/// while bed-like tracks such as `cpgIslandExt` are `bin chrom chromStart chromEnd ...`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimaryTableColumns {
    pub chrom: usize,
    pub start: usize,
    pub end: usize,
}

impl PrimaryTableColumns {
    pub const GENE_PRED: PrimaryTableColumns = PrimaryTableColumns {
        chrom: 1,
        start: 3,
        end: 4,
    };

    pub const BINNED_BED: PrimaryTableColumns = PrimaryTableColumns {
        chrom: 1,
        start: 2,
        end: 3,
    };
}

impl TrackRow {
    ///
    /// Parse the tab separated text of a primary table dump.
    ///
    /// `#` header lines and rows with a single field are skipped; rows that
    /// are too short for `columns` or carry non-numeric coordinates are errors.
    pub fn parse_primary_table(
        text: &str,
        columns: PrimaryTableColumns,
    ) -> IntervalSetResult<Vec<TrackRow>> {
        let needed = columns.chrom.max(columns.start).max(columns.end);
        let mut rows = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() <= 1 {
                continue;
            }
            if fields.len() <= needed {
                return Err(IntervalSetError::IntervalParseError(line.to_string()));
            }

            let parse = |idx: usize| {
                fields[idx]
                    .parse::<u32>()
                    .map_err(|_| IntervalSetError::IntervalParseError(line.to_string()))
            };

            rows.push(TrackRow {
                chrom: fields[columns.chrom].to_string(),
                start: parse(columns.start)?,
                end: parse(columns.end)?,
            });
        }

        Ok(rows)
    }
}

/// Something that can fetch raw interval rows for a track window, e.g. a
/// genome browser table API client.
pub trait GenomeTrackSource {
    fn fetch(&self, query: &TrackQuery) -> IntervalSetResult<Vec<TrackRow>>;
}

///
/// Fetch a track window and turn it into an [IntervalSet] for the query's assembly.
///
pub fn load_track<S: GenomeTrackSource + ?Sized>(
    source: &S,
    query: &TrackQuery,
) -> IntervalSetResult<IntervalSet> {
    let rows = source.fetch(query)?;
    IntervalSet::from_track_rows(query.assembly.clone(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    const KNOWN_GENE: &str = "#name\tchrom\tstrand\ttxStart\ttxEnd\tcdsStart\tcdsEnd\n\
        ENST0001\tchr1\t+\t100\t500\t120\t480\n\
        ENST0002\tchr1\t-\t900\t1500\t900\t1500\n\
        \n";

    struct FixedSource;

    impl GenomeTrackSource for FixedSource {
        fn fetch(&self, query: &TrackQuery) -> IntervalSetResult<Vec<TrackRow>> {
            if query.track != "knownGene" {
                return Err(IntervalSetError::TrackFetchError(query.track.clone()));
            }
            TrackRow::parse_primary_table(KNOWN_GENE, PrimaryTableColumns::GENE_PRED)
        }
    }

    #[fixture]
    fn query() -> TrackQuery {
        TrackQuery {
            track: "knownGene".to_string(),
            assembly: "hg38".to_string(),
            chrom: "chr1".to_string(),
            start: 0,
            end: 2000,
        }
    }

    #[rstest]
    fn test_parse_gene_pred_rows() {
        let rows = TrackRow::parse_primary_table(KNOWN_GENE, PrimaryTableColumns::GENE_PRED)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            TrackRow {
                chrom: "chr1".to_string(),
                start: 100,
                end: 500
            }
        );
    }

    #[rstest]
    fn test_parse_short_row_is_error() {
        let result = TrackRow::parse_primary_table("585\tchr1\t10", PrimaryTableColumns::BINNED_BED);
        assert!(matches!(result, Err(IntervalSetError::IntervalParseError(_))));
    }

    #[rstest]
    fn test_load_track(query: TrackQuery) {
        let set = load_track(&FixedSource, &query).unwrap();
        assert_eq!(set.assembly(), "hg38");
        assert_eq!(set.total_length(), 1000);
    }

    #[rstest]
    fn test_load_track_propagates_source_error(mut query: TrackQuery) {
        query.track = "tRNAs".to_string();
        let result = load_track(&FixedSource, &query);
        assert!(matches!(result, Err(IntervalSetError::TrackFetchError(_))));
    }
}
