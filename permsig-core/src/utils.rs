use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use crate::errors::IntervalSetResult;
use crate::models::IntervalSet;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> std::io::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(flate2::read::MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// File name of a track stored on disk: `<track>_<assembly>.bed`.
///
pub fn track_file_name(track: &str, assembly: &str) -> String {
    format!("{}_{}.bed", track, assembly)
}

///
/// Load several named feature tracks from a directory laid out as
/// `<dir>/<track>_<assembly>.bed`, keeping the order of `tracks`.
///
/// # Arguments
/// - dir: directory holding the track files
/// - tracks: track names, e.g. `cpgIslandExt`
/// - assembly: assembly suffix of the files and of the returned sets
pub fn load_named_features<P: AsRef<Path>, S: AsRef<str>>(
    dir: P,
    tracks: &[S],
    assembly: &str,
) -> IntervalSetResult<Vec<(String, IntervalSet)>> {
    tracks
        .iter()
        .map(|track| {
            let track = track.as_ref();
            let path = dir.as_ref().join(track_file_name(track, assembly));
            debug!("Loading track {} from {}", track, path.display());
            IntervalSet::from_bed(&path, assembly).map(|set| (track.to_string(), set))
        })
        .collect()
}
