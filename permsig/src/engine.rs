//! Concurrent shuffle-and-measure trials producing the null distribution.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use permsig_core::models::{ChromSizes, IntervalSet};

use crate::config::{ConfigError, validate_fraction, validate_permutation_count};
use crate::errors::{PermTestError, PermTestResult};
use crate::observer::{NoopObserver, TrialObserver, TrialReport};
use crate::overlap::{OverlapEvaluator, checked_total_length};
use crate::shuffle::shuffle;

///
/// Shared flag asking a running engine to stop.
///
/// Clones share the flag, so a token can be handed to another thread (or to
/// an observer) and raised from there.
///
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

///
/// Runs independent permutation trials on a bounded rayon pool.
///
/// Every trial shuffles the feature set with its own seed and measures the
/// overlap ratio of the shuffled set against the reference. The inputs are
/// only borrowed; trials share nothing but the final join.
///
/// The run is fail-fast: once a trial errors, trials that have not started
/// are skipped and the error is returned as is. Raising the
/// [CancellationToken] has the same effect and yields [PermTestError::Cancelled].
///
pub struct PermutationEngine {
    pool: ThreadPool,
    seed: Option<u64>,
    observer: Arc<dyn TrialObserver>,
    cancel: CancellationToken,
}

impl PermutationEngine {
    ///
    /// Create an engine with `threads` workers, or one per available core.
    ///
    pub fn new(threads: Option<usize>) -> PermTestResult<Self> {
        let threads = match threads {
            Some(0) => return Err(ConfigError::InvalidThreadCount.into()),
            Some(threads) => threads,
            None => available_threads(),
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("permsig-worker-{}", idx))
            .build()
            .map_err(|e| PermTestError::WorkerFailure(e.to_string()))?;

        Ok(PermutationEngine {
            pool,
            seed: None,
            observer: Arc::new(NoopObserver),
            cancel: CancellationToken::new(),
        })
    }

    /// Fix the base seed; trial `i` then uses `seed + i`.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_observer<O: TrialObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    ///
    /// Run `num_permutations` trials and return their overlap ratios, ordered
    /// by trial.
    ///
    /// # Arguments
    /// - num_permutations: number of trials, at least 1
    /// - feature: the set that gets shuffled
    /// - reference: the set overlap is measured against
    /// - min_fraction: minimum covered fraction of a feature interval, in (0, 1]
    /// - chrom_sizes: bounds for the shuffle
    pub fn run(
        &self,
        num_permutations: usize,
        feature: &IntervalSet,
        reference: &IntervalSet,
        min_fraction: f64,
        chrom_sizes: &ChromSizes,
    ) -> PermTestResult<Vec<f64>> {
        validate_run(num_permutations, feature, min_fraction)?;

        let evaluator = OverlapEvaluator::new(reference);
        let seeds = self.seeds(num_permutations);
        self.run_trials(&seeds, feature, &evaluator, min_fraction, chrom_sizes)
    }

    ///
    /// Like [PermutationEngine::run], against an already indexed reference.
    ///
    pub fn run_with_evaluator(
        &self,
        num_permutations: usize,
        feature: &IntervalSet,
        evaluator: &OverlapEvaluator,
        min_fraction: f64,
        chrom_sizes: &ChromSizes,
    ) -> PermTestResult<Vec<f64>> {
        validate_run(num_permutations, feature, min_fraction)?;

        let seeds = self.seeds(num_permutations);
        self.run_trials(&seeds, feature, evaluator, min_fraction, chrom_sizes)
    }

    ///
    /// Run one trial per entry of `seeds`. Identical seeds give identical
    /// ratios whatever the thread count.
    ///
    pub fn run_with_seeds(
        &self,
        seeds: &[u64],
        feature: &IntervalSet,
        reference: &IntervalSet,
        min_fraction: f64,
        chrom_sizes: &ChromSizes,
    ) -> PermTestResult<Vec<f64>> {
        validate_run(seeds.len(), feature, min_fraction)?;

        let evaluator = OverlapEvaluator::new(reference);
        self.run_trials(seeds, feature, &evaluator, min_fraction, chrom_sizes)
    }

    fn seeds(&self, num_permutations: usize) -> Vec<u64> {
        let base_seed = self.seed.unwrap_or_else(rand::random);
        trial_seeds(base_seed, num_permutations)
    }

    /// Callers validate their inputs first.
    fn run_trials(
        &self,
        seeds: &[u64],
        feature: &IntervalSet,
        evaluator: &OverlapEvaluator,
        min_fraction: f64,
        chrom_sizes: &ChromSizes,
    ) -> PermTestResult<Vec<f64>> {
        if self.cancel.is_cancelled() {
            return Err(PermTestError::Cancelled);
        }

        info!(
            "Running {} permutations of {} intervals on {} threads",
            seeds.len(),
            feature.len(),
            self.threads()
        );

        let ratios: Vec<f64> = self.pool.install(|| {
            seeds
                .par_iter()
                .enumerate()
                .map(|(trial, &seed)| {
                    self.trial(trial, seed, feature, evaluator, min_fraction, chrom_sizes)
                })
                .collect::<PermTestResult<Vec<f64>>>()
        })?;

        // raised after the last trial started: still no results
        if self.cancel.is_cancelled() {
            return Err(PermTestError::Cancelled);
        }

        Ok(ratios)
    }

    fn trial(
        &self,
        trial: usize,
        seed: u64,
        feature: &IntervalSet,
        evaluator: &OverlapEvaluator,
        min_fraction: f64,
        chrom_sizes: &ChromSizes,
    ) -> PermTestResult<f64> {
        if self.cancel.is_cancelled() {
            return Err(PermTestError::Cancelled);
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> PermTestResult<f64> {
            let shuffled = shuffle(chrom_sizes, feature, seed)?;
            let ratio = evaluator.ratio(&shuffled, min_fraction)?;
            self.observer
                .on_trial_complete(&TrialReport { trial, seed, ratio });
            Ok(ratio)
        }));

        outcome.unwrap_or_else(|payload| {
            Err(PermTestError::WorkerFailure(format!(
                "trial {} panicked: {}",
                trial,
                panic_message(payload.as_ref())
            )))
        })
    }
}

fn validate_run(
    num_permutations: usize,
    feature: &IntervalSet,
    min_fraction: f64,
) -> PermTestResult<()> {
    validate_permutation_count(num_permutations)?;
    validate_fraction(min_fraction)?;
    checked_total_length(feature)?;
    Ok(())
}

/// Seeds for `count` trials starting at `base_seed`.
pub fn trial_seeds(base_seed: u64, count: usize) -> Vec<u64> {
    (0..count as u64)
        .map(|idx| base_seed.wrapping_add(idx))
        .collect()
}

fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|c| c.into())
        .unwrap_or(1)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
