use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntervalSetError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing interval: {0}")]
    IntervalParseError(String),

    #[error("Invalid interval {chr}:{start}-{end}: end is before start")]
    InvalidInterval { chr: String, start: u32, end: u32 },

    #[error("No intervals found in file: {0}")]
    EmptyIntervalSet(String),

    #[error("Error parsing chrom sizes line: {0}")]
    ChromSizesParseError(String),

    #[error("No chrom sizes found for assembly: {0}")]
    UnknownAssembly(String),

    #[error("Can't fetch track data: {0}")]
    TrackFetchError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type IntervalSetResult<T> = std::result::Result<T, IntervalSetError>;
