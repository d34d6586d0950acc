//! End-to-end permutation tests over the BED fixtures in `tests/data`.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use permsig::{
    LoggingObserver, PermTestConfig, PermTestError, PermutationTest, TrialObserver, TrialReport,
    batch_compute, compute_posterior, overlap_ratio,
};
use permsig_core::models::{ChromSizes, GenomicInterval, IntervalSet};
use permsig_core::traits::{ChromSizeProvider, ChromSizesDir, IntervalAlgebra};
use permsig_core::utils::{load_named_features, track_file_name};
use permsig_overlaprs::AIListAlgebra;

#[fixture]
fn data_dir() -> &'static Path {
    Path::new("../tests/data/intervalset")
}

#[fixture]
fn chrom_sizes(data_dir: &Path) -> ChromSizes {
    ChromSizesDir::new(data_dir).chrom_sizes("dummy").unwrap()
}

#[fixture]
fn reference(data_dir: &Path) -> IntervalSet {
    IntervalSet::from_bed(data_dir.join("dummy.bed"), "dummy").unwrap()
}

fn write_track(dir: &Path, track: &str, lines: &[&str]) {
    let mut file = File::create(dir.join(track_file_name(track, "dummy"))).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
}

#[rstest]
fn test_reference_against_itself(chrom_sizes: ChromSizes, reference: IntervalSet, data_dir: &Path) {
    let gzipped = IntervalSet::from_bed(data_dir.join("dummy.bed.gz"), "dummy").unwrap();
    assert_eq!(gzipped.total_length(), 600);

    let estimate =
        compute_posterior(&chrom_sizes, &reference, &gzipped, 1.0, 200, 0.5, 0.5).unwrap();

    assert_eq!(estimate.observed_ratio(), 1.0);
    assert!(estimate.posterior_probability_f64() > 0.5);
}

#[rstest]
fn test_batch_over_track_directory(chrom_sizes: ChromSizes, reference: IntervalSet) -> anyhow::Result<()> {
    let tempdir = tempfile::tempdir()?;
    write_track(tempdir.path(), "inside", &["chr1\t120\t180", "chr2\t60\t140"]);
    write_track(tempdir.path(), "outside", &["chr1\t5000\t5100", "chr3\t500\t600"]);
    write_track(tempdir.path(), "half", &["chr1\t150\t250", "chr3\t1500\t1600"]);

    let features = load_named_features(tempdir.path(), &["inside", "outside", "half"], "dummy")?;
    let results = batch_compute(&chrom_sizes, &reference, &features, 1e-9, 100, 0.5, 0.5)?;

    let summary: Vec<(&str, f64)> = results
        .iter()
        .map(|(name, estimate)| (name.as_str(), estimate.observed_ratio()))
        .collect();
    assert_eq!(summary, vec![("inside", 1.0), ("outside", 0.0), ("half", 0.5)]);

    assert_eq!(results[1].1.posterior_probability_f64(), 0.0);
    Ok(())
}

#[rstest]
fn test_empty_batch(chrom_sizes: ChromSizes, reference: IntervalSet) {
    let results = batch_compute(&chrom_sizes, &reference, &[], 0.5, 10, 0.5, 0.5).unwrap();
    assert!(results.is_empty());
}

#[rstest]
fn test_ratio_agrees_with_intersection(reference: IntervalSet, data_dir: &Path) {
    let headers = IntervalSet::from_bed(data_dir.join("dummy_headers.bed"), "dummy").unwrap();
    assert_eq!(headers.len(), 3);

    let mut intervals = headers.intervals().to_vec();
    intervals.push(GenomicInterval::new("chr1", 150, 250).unwrap());
    intervals.push(GenomicInterval::new("chr1", 90, 110).unwrap());
    let feature = IntervalSet::new("dummy", intervals);

    for min_fraction in [1e-9, 0.5, 1.0] {
        let covered = AIListAlgebra.intersect(&feature, &reference, min_fraction, true);
        let expected = covered.total_length() as f64 / feature.total_length() as f64;
        assert_eq!(overlap_ratio(&feature, &reference, min_fraction).unwrap(), expected);
    }
}

#[rstest]
fn test_config_file_drives_run(chrom_sizes: ChromSizes, reference: IntervalSet) -> anyhow::Result<()> {
    let tempdir = tempfile::tempdir()?;
    let path = tempdir.path().join("permtest.toml");
    let mut file = File::create(&path)?;
    writeln!(file, "num_permutations = 40\nseed = 5\nthreads = 2\nmin_overlap_fraction = 0.5")?;

    let config = PermTestConfig::try_from(path.as_path())?;
    let feature = IntervalSet::new("dummy", reference.intervals()[..2].to_vec());

    let trials = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&trials);
    let first = PermutationTest::new(config.clone())?
        .with_observer(move |report: &TrialReport| {
            LoggingObserver.on_trial_complete(report);
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .compute(&chrom_sizes, &reference, &feature)?;
    let second = PermutationTest::new(config)?.compute(&chrom_sizes, &reference, &feature)?;

    assert_eq!(trials.load(Ordering::SeqCst), 40);
    assert_eq!(first, second);
    Ok(())
}

#[rstest]
fn test_interval_longer_than_chromosome(chrom_sizes: ChromSizes, reference: IntervalSet) {
    let feature = IntervalSet::new(
        "dummy",
        vec![GenomicInterval::new("chr3", 0, 2_500).unwrap()],
    );
    let result = compute_posterior(&chrom_sizes, &reference, &feature, 0.5, 50, 0.5, 0.5);
    assert!(matches!(result, Err(PermTestError::ChromosomeTooShort { .. })));
}
