//! Callbacks fired as permutation trials finish.

use log::debug;

/// What a finished trial reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialReport {
    /// Position of the trial in the run, `0..num_permutations`.
    pub trial: usize,
    pub seed: u64,
    pub ratio: f64,
}

/// Receives a [TrialReport] for every successful trial.
///
/// Called from worker threads in completion order, which is not trial order.
/// Any `Fn(&TrialReport) + Send + Sync` closure is an observer.
pub trait TrialObserver: Send + Sync {
    fn on_trial_complete(&self, report: &TrialReport);
}

impl<F> TrialObserver for F
where
    F: Fn(&TrialReport) + Send + Sync,
{
    fn on_trial_complete(&self, report: &TrialReport) {
        self(report)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TrialObserver for NoopObserver {
    fn on_trial_complete(&self, _report: &TrialReport) {}
}

/// Logs each trial at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl TrialObserver for LoggingObserver {
    fn on_trial_complete(&self, report: &TrialReport) {
        debug!(
            "Trial {} (seed {}) finished with overlap ratio {:.6}",
            report.trial, report.seed, report.ratio
        );
    }
}
